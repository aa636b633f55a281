use axum::body::Bytes;
use std::path::Path;
use uuid::Uuid;

/// File part received in a multipart request.
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Write `upload` under `upload_dir/<category>/` with a fresh name and return
/// the public reference it is served at.
pub async fn store(upload_dir: &Path, category: &str, upload: &Upload) -> std::io::Result<String> {
    let dir = upload_dir.join(category);
    tokio::fs::create_dir_all(&dir).await?;

    let file_name = match extension(&upload.file_name) {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    };
    tokio::fs::write(dir.join(&file_name), &upload.bytes).await?;

    tracing::info!(category = %category, file_name = %file_name, bytes = upload.bytes.len(), "stored upload");
    Ok(format!("/uploads/{category}/{file_name}"))
}

// Only short alphanumeric extensions survive; anything else is dropped
fn extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    (!ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .then(|| ext.to_ascii_lowercase())
}
