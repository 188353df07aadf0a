use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 扫描目录中的计分卡图片
///
/// 只看当前目录（不递归），扩展名区分大小写，跳过隐藏文件，符号链接按其指向的文件判断。
/// 按文件名排序，保证多次运行顺序一致。
pub async fn discover_images(folder: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder.display());
    }

    let mut images = Vec::new();
    let mut entries = fs::read_dir(folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_hidden = entry.file_name().to_string_lossy().starts_with('.');
        if is_hidden || path.extension().and_then(|s| s.to_str()) != Some(extension) {
            continue;
        }

        // fs::metadata 会跟随符号链接
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("无法访问 {}，已跳过: {}", path.display(), e);
                continue;
            }
        }

        tracing::debug!(
            "发现图片: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        images.push(path);
    }

    images.sort();
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_only_matching_files_in_top_level() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join("round2.png"), b"b").unwrap();
        std::fs::write(root.join("round1.png"), b"a").unwrap();
        std::fs::write(root.join("notes.txt"), b"x").unwrap();
        std::fs::write(root.join("upper.PNG"), b"x").unwrap();
        std::fs::create_dir(root.join("nested")).unwrap();
        std::fs::write(root.join("nested").join("round3.png"), b"c").unwrap();
        std::fs::create_dir(root.join("folder.png")).unwrap();

        let images = discover_images(root, "png").await.unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["round1.png", "round2.png"]);
    }

    #[tokio::test]
    async fn test_hidden_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".tmp.png"), b"x").unwrap();
        std::fs::write(dir.path().join("round1.png"), b"a").unwrap();

        let images = discover_images(dir.path(), "png").await.unwrap();
        assert_eq!(images, vec![dir.path().join("round1.png")]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_image_is_included() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        let input = dir.path().join("images");
        std::fs::create_dir(&real).unwrap();
        std::fs::create_dir(&input).unwrap();
        std::fs::write(real.join("scan.png"), b"png").unwrap();
        std::os::unix::fs::symlink(real.join("scan.png"), input.join("round1.png")).unwrap();
        // 指向不存在文件的链接只跳过，不影响扫描
        std::os::unix::fs::symlink(real.join("gone.png"), input.join("round2.png")).unwrap();

        let images = discover_images(&input, "png").await.unwrap();
        assert_eq!(images, vec![input.join("round1.png")]);
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let images = discover_images(dir.path(), "png").await.unwrap();
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = discover_images(&dir.path().join("missing"), "png").await;
        assert!(result.is_err());
    }
}
