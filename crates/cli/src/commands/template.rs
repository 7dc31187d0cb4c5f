use agentscout_core::config::AppConfig;
use agentscout_store::kv::FileKvStore;
use agentscout_store::repositories::TemplateRepository;

use super::{CommandResult, EXIT_STORE};

pub fn list(config: &AppConfig) -> CommandResult {
    let repository = match open(config) {
        Ok(repository) => repository,
        Err(result) => return result,
    };

    let templates = repository.list();
    CommandResult::success(
        "template",
        serde_json::json!({ "count": templates.len(), "templates": templates }),
    )
}

pub fn remove(config: &AppConfig, id: &str) -> CommandResult {
    let repository = match open(config) {
        Ok(repository) => repository,
        Err(result) => return result,
    };

    if let Err(error) = repository.remove(id) {
        return CommandResult::failure("template", "store", error.to_string(), EXIT_STORE);
    }
    CommandResult::success("template", serde_json::json!({ "removed": id }))
}

pub fn clear(config: &AppConfig) -> CommandResult {
    let repository = match open(config) {
        Ok(repository) => repository,
        Err(result) => return result,
    };

    repository.clear();
    CommandResult::success("template", serde_json::json!({ "cleared": true }))
}

fn open(config: &AppConfig) -> Result<TemplateRepository<FileKvStore>, CommandResult> {
    FileKvStore::new(&config.data_dir).map(TemplateRepository::new).map_err(|error| {
        CommandResult::failure("template", "store", error.to_string(), EXIT_STORE)
    })
}
