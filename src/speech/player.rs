// src/speech/player.rs — Platform audio playback

use std::path::Path;
use std::process::Stdio;

use crate::infra::errors::FoveaError;

/// Build the player invocation for `path`: the program name plus its
/// full argument list. An explicit override wins over the platform
/// table (ffplay on Linux, afplay on macOS, PowerShell on Windows).
fn invocation(path: &Path, override_cmd: Option<&str>) -> Result<(String, Vec<String>), FoveaError> {
    if let Some(cmd) = override_cmd {
        which::which(cmd).map_err(|_| {
            FoveaError::Speech(format!("configured player '{cmd}' not found in PATH"))
        })?;
        return Ok((cmd.to_string(), vec![path.display().to_string()]));
    }

    #[cfg(target_os = "macos")]
    {
        which::which("afplay")
            .map_err(|_| FoveaError::Speech("afplay not found in PATH".into()))?;
        Ok(("afplay".into(), vec![path.display().to_string()]))
    }

    #[cfg(target_os = "windows")]
    {
        Ok((
            "powershell".into(),
            vec![
                "-c".into(),
                format!(
                    "(New-Object Media.SoundPlayer '{}').PlaySync();",
                    path.display()
                ),
            ],
        ))
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        which::which("ffplay")
            .map_err(|_| FoveaError::Speech("ffplay not found in PATH (install ffmpeg)".into()))?;
        Ok((
            "ffplay".into(),
            vec![
                "-nodisp".into(),
                "-autoexit".into(),
                path.display().to_string(),
            ],
        ))
    }
}

/// Play an audio file and wait for playback to finish.
pub async fn play_file(path: &Path, override_cmd: Option<&str>) -> Result<(), FoveaError> {
    let (program, args) = invocation(path, override_cmd)?;

    tracing::debug!("Playing audio via {program}");
    let status = tokio::process::Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| FoveaError::Speech(format!("player '{program}' failed to start: {e}")))?;

    if !status.success() {
        return Err(FoveaError::Speech(format!(
            "player '{program}' exited with {status}"
        )));
    }
    Ok(())
}
