use agentscout_core::config::AppConfig;
use agentscout_store::kv::FileKvStore;
use agentscout_store::repositories::HistoryRepository;

use super::{CommandResult, EXIT_STORE};

pub fn list(config: &AppConfig) -> CommandResult {
    let repository = match open(config) {
        Ok(repository) => repository,
        Err(result) => return result,
    };

    let items = repository.read_all();
    CommandResult::success(
        "history",
        serde_json::json!({ "count": items.len(), "items": items }),
    )
}

pub fn clear(config: &AppConfig) -> CommandResult {
    let repository = match open(config) {
        Ok(repository) => repository,
        Err(result) => return result,
    };

    repository.clear();
    CommandResult::success("history", serde_json::json!({ "cleared": true }))
}

fn open(config: &AppConfig) -> Result<HistoryRepository<FileKvStore>, CommandResult> {
    FileKvStore::new(&config.data_dir).map(HistoryRepository::new).map_err(|error| {
        CommandResult::failure("history", "store", error.to_string(), EXIT_STORE)
    })
}
