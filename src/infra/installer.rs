use std::path::Path;
use std::time::Duration;

use tokio::process::Command;

use crate::error::{AppError, AppResult};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

pub fn installer_url(repo: &str) -> String {
    format!("https://raw.githubusercontent.com/{repo}/main/install.sh")
}

/// Downloads the published install script and hands the rest of the
/// update over to it. The script replaces the running binary, so this
/// process only reports whether the script succeeded.
pub async fn download_and_run(repo: &str) -> AppResult<()> {
    let url = installer_url(repo);
    let script = reqwest::Client::new()
        .get(&url)
        .timeout(DOWNLOAD_TIMEOUT)
        .send()
        .await
        .map_err(|err| AppError::Update(format!("could not download the installer: {err}")))?;

    let status = script.status();
    if !status.is_success() {
        return Err(AppError::Update(format!(
            "installer download responded with {status}"
        )));
    }

    let body = script
        .text()
        .await
        .map_err(|err| AppError::Update(format!("could not read the installer: {err}")))?;

    let script_path = std::env::temp_dir().join("baton_install.sh");
    std::fs::write(&script_path, body)?;
    make_executable(&script_path)?;

    let result = Command::new("sh")
        .arg(&script_path)
        .status()
        .await
        .map_err(|err| AppError::Update(format!("could not run the installer: {err}")));

    // Remove the script whether the installer succeeded or not.
    let _ = std::fs::remove_file(&script_path);

    let exit = result?;
    if !exit.success() {
        return Err(AppError::Update(format!(
            "installer exited with {}",
            exit.code()
                .map(|code| code.to_string())
                .unwrap_or_else(|| "signal".to_string())
        )));
    }
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> AppResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> AppResult<()> {
    Ok(())
}
