use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub const SCREEN_OUT_FILENAME: &str = "google-assistant-sdk-screen-out.html";
pub const AUDIO_OUT_FILENAME: &str = "google-assistant-sdk-audio-out.mp3";

/// Stores response payloads in a private temp directory and opens them with
/// the system's default handler. The directory is removed on drop.
pub struct SystemBrowser {
    tempdir: TempDir,
}

impl SystemBrowser {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            tempdir: tempfile::Builder::new().prefix("gassist-text").tempdir()?,
        })
    }

    pub fn dir(&self) -> &Path {
        self.tempdir.path()
    }

    /// Writes `contents` to `filename` inside the temp directory, replacing
    /// any earlier file of that name.
    pub fn store(&self, contents: &[u8], filename: &str) -> io::Result<PathBuf> {
        let path = self.tempdir.path().join(filename);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Stores `contents` and opens the file.
    pub fn display(&self, contents: &[u8], filename: &str) -> io::Result<PathBuf> {
        let path = self.store(contents, filename)?;
        open(&path)?;
        Ok(path)
    }
}

/// Opens `path` with the platform's default handler without waiting for it.
pub fn open(path: &Path) -> io::Result<()> {
    tracing::debug!("opening {}", path.display());
    opener_command(path).spawn().map(|_| ())
}

fn opener_command(path: &Path) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut command = Command::new("open");
        command.arg(path);
        command
    }

    #[cfg(target_os = "windows")]
    {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        command
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}
