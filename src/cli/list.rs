//! `tasklist list`: print tasks without starting the server

use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;
use crate::operations::tasks::{TaskFilter, TaskService};
use crate::storage::config::{self, Config};
use crate::storage::tasks::{Task, TaskStore};

fn load(filter: &str, data_file: Option<PathBuf>, config: &Config) -> Result<Vec<Task>> {
    let store = TaskStore::new(config::resolve_tasks_file(data_file, config));
    TaskService::new(store).list(TaskFilter::parse(filter))
}

pub fn execute(filter: &str, data_file: Option<PathBuf>, config: &Config) -> Result<()> {
    let tasks = load(filter, data_file, config)?;
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &tasks)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::tasks::NewTask;
    use tempfile::TempDir;

    #[test]
    fn test_load_applies_filter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let svc = TaskService::new(TaskStore::new(&path));
        let done = svc
            .create(NewTask {
                title: Some("done".to_string()),
                ..Default::default()
            })
            .unwrap();
        svc.create(NewTask {
            title: Some("open".to_string()),
            ..Default::default()
        })
        .unwrap();
        svc.set_completion(&done.id, Some(true)).unwrap();

        let config = Config::default();
        let completed = load("completed", Some(path.clone()), &config).unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].title, "done");
        assert_eq!(load("all", Some(path), &config).unwrap().len(), 2);
    }
}
