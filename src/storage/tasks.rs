use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ensure_parent_dir, replace_file};

/// 任务数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// 任务 ID (UUID v4，创建后不可变)
    pub id: String,
    /// 标题 (去除首尾空白后非空)
    pub title: String,
    /// 描述 (缺省为空串)
    #[serde(default)]
    pub description: String,
    /// 截止日期 (通常为 YYYY-MM-DD，原样保存，缺省为空串)
    #[serde(default)]
    pub due_date: String,
    /// 是否完成
    #[serde(default)]
    pub completed: bool,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 最后修改时间
    pub updated_at: DateTime<Utc>,
}

/// 任务文档存储：整个集合存放在一个 JSON 数组文件中
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 文档路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 确保父目录与空集合文档存在
    pub fn ensure(&self) -> io::Result<()> {
        ensure_parent_dir(&self.path)?;
        if !self.path.exists() {
            std::fs::write(&self.path, "[]")?;
        }
        Ok(())
    }

    /// 读取文档，拆分为可识别的任务与无法识别的条目
    ///
    /// 文档缺失、不可读或不是 JSON 数组时两者皆为空。
    fn read_document(&self) -> (Vec<Task>, Vec<serde_json::Value>) {
        if let Err(e) = self.ensure() {
            tracing::warn!(path = %self.path.display(), error = %e, "cannot create task document");
            return (Vec::new(), Vec::new());
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read task document");
                return (Vec::new(), Vec::new());
            }
        };

        if content.trim().is_empty() {
            return (Vec::new(), Vec::new());
        }

        let entries = match serde_json::from_str::<Vec<serde_json::Value>>(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "task document is not an array, treating as empty"
                );
                return (Vec::new(), Vec::new());
            }
        };

        let mut tasks = Vec::with_capacity(entries.len());
        let mut foreign = Vec::new();
        for entry in entries {
            match Task::deserialize(&entry) {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "skipping unreadable task entry");
                    foreign.push(entry);
                }
            }
        }
        (tasks, foreign)
    }

    /// 加载全部任务
    ///
    /// 文档缺失、不可读或不是数组时返回空集合，从不报错；
    /// 数组中无法识别的条目被跳过，其余任务照常返回。
    pub fn read_all(&self) -> Vec<Task> {
        self.read_document().0
    }

    /// 保存全部任务（整体替换文档）
    ///
    /// 文档中无法识别的条目原样保留在数组末尾。
    pub fn write_all(&self, tasks: &[Task]) -> io::Result<()> {
        let (_, foreign) = self.read_document();

        let mut entries = Vec::with_capacity(tasks.len() + foreign.len());
        for task in tasks {
            entries.push(
                serde_json::to_value(task)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            );
        }
        entries.extend(foreign);

        let content = serde_json::to_string_pretty(&entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        replace_file(&self.path, content.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample(id: &str, completed: bool) -> Task {
        let now = Utc::now();
        Task {
            id: id.to_string(),
            title: format!("task {}", id),
            description: String::new(),
            due_date: "2025-01-31".to_string(),
            completed,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_ensure_creates_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("data").join("tasks.json"));

        store.ensure().unwrap();

        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn test_ensure_keeps_existing_document() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        store.write_all(&[sample("a", false)]).unwrap();

        store.ensure().unwrap();

        assert_eq!(store.read_all().len(), 1);
    }

    #[test]
    fn test_read_all_missing_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));

        assert!(store.read_all().is_empty());
        assert!(store.path().exists());
    }

    #[test]
    fn test_read_all_corrupt_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(TaskStore::new(&path).read_all().is_empty());
    }

    #[test]
    fn test_read_all_non_array_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, r#"{"tasks": []}"#).unwrap();

        assert!(TaskStore::new(&path).read_all().is_empty());
    }

    #[test]
    fn test_write_then_read_keeps_order() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        let tasks = vec![sample("b", true), sample("a", false), sample("c", false)];

        store.write_all(&tasks).unwrap();

        assert_eq!(store.read_all(), tasks);
    }

    #[test]
    fn test_document_uses_camel_case_fields() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        store.write_all(&[sample("a", false)]).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        let obj = &raw[0];
        assert_eq!(obj["dueDate"], "2025-01-31");
        assert!(obj["createdAt"].is_string());
        assert!(obj["updatedAt"].is_string());
        assert!(obj.get("due_date").is_none());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(
            &path,
            r#"[{"id":"x","title":"t","createdAt":"2024-05-01T10:00:00Z","updatedAt":"2024-05-01T10:00:00Z"}]"#,
        )
        .unwrap();

        let tasks = TaskStore::new(&path).read_all();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "");
        assert_eq!(tasks[0].due_date, "");
        assert!(!tasks[0].completed);
    }

    #[test]
    fn test_unreadable_entry_does_not_hide_other_tasks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let keep = sample("keep", false);
        let legacy = serde_json::json!({ "id": "b", "title": "legacy", "completed": false });
        std::fs::write(
            &path,
            serde_json::to_string(&serde_json::json!([keep, legacy])).unwrap(),
        )
        .unwrap();
        let store = TaskStore::new(&path);

        assert_eq!(store.read_all(), vec![keep.clone()]);

        let added = sample("new", false);
        store.write_all(&[keep.clone(), added.clone()]).unwrap();

        assert_eq!(store.read_all(), vec![keep, added]);
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[2], legacy);
    }
}
