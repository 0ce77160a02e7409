use std::path::{Path, PathBuf};

use shared::{domain::ExportFormat, protocol::VendorUpload};
use tracing::info;

use crate::{
    api::VendorApi,
    error::{ClientError, ClientResult},
};

/// Saves the server-generated export under `dir` using the format's default file name.
pub async fn download_to(
    api: &dyn VendorApi,
    format: ExportFormat,
    dir: &Path,
) -> ClientResult<PathBuf> {
    let bytes = api.download_export(format).await?;
    let target = dir.join(format.default_file_name());
    tokio::fs::write(&target, &bytes)
        .await
        .map_err(|source| ClientError::Io {
            context: format!("save {}", target.display()),
            source,
        })?;
    info!(path = %target.display(), bytes = bytes.len(), "vendor export saved");
    Ok(target)
}

pub async fn upload_file(api: &dyn VendorApi, path: &Path) -> ClientResult<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ClientError::Io {
            context: format!("read {}", path.display()),
            source,
        })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "vendors".to_string());

    let message = api
        .upload_vendors(VendorUpload {
            mime_type: mime_guess::from_path(path).first_raw().map(str::to_string),
            file_name,
            bytes,
        })
        .await?;
    info!(path = %path.display(), "vendor file uploaded");
    Ok(message)
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
