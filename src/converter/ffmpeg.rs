use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use super::Converter;
use crate::error::{ConvertError, Result};
use crate::policy::ExtensionToken;
use crate::tools;

/// How a finished transcoder process ended. `code` is `None` when it was
/// killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    pub code: Option<i32>,
}

impl ProcessStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// A program plus its argument vector. Never goes through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl MediaCommand {
    /// Pick the argument template for `target`. Only mp3 and gif are wired.
    pub fn for_target(
        program: impl Into<PathBuf>,
        input: &Path,
        output: &Path,
        target: &ExtensionToken,
    ) -> Result<Self> {
        let filters: &[&str] = match target.name() {
            "mp3" => &["-q:a", "0", "-map", "a"],
            "gif" => &["-vf", "fps=10,scale=640:-1:flags=lanczos"],
            _ => {
                return Err(ConvertError::UnsupportedMediaConversion {
                    ext: target.to_string(),
                })
            }
        };

        let mut args: Vec<OsString> = vec!["-i".into(), input.into()];
        args.extend(filters.iter().map(|a| OsString::from(*a)));
        args.push(output.into());

        Ok(Self {
            program: program.into(),
            args,
        })
    }
}

/// Runs a command to completion and reports how it exited.
pub trait CommandRunner {
    fn run(&self, command: &MediaCommand) -> Result<ProcessStatus>;
}

/// Spawns the real process with inherited stdio and blocks until it exits.
#[derive(Debug, Default, Clone)]
pub struct SystemRunner {
    ffmpeg: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new(ffmpeg: Option<PathBuf>) -> Self {
        Self { ffmpeg }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &MediaCommand) -> Result<ProcessStatus> {
        let name = command.program.to_string_lossy();
        let program = tools::get_tool_path(&name, self.ffmpeg.as_deref())?;

        log::info!(
            "Running: {} {}",
            program.display(),
            command
                .args
                .iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let status = Command::new(&program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        Ok(ProcessStatus {
            code: status.code(),
        })
    }
}

/// Media delegate: builds the ffmpeg invocation and checks its exit status.
pub struct FfmpegConverter<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> FfmpegConverter<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> Converter for FfmpegConverter<R> {
    fn convert(&self, input: &Path, output: &Path, target: &ExtensionToken) -> Result<()> {
        let command = MediaCommand::for_target("ffmpeg", input, output, target)?;
        let status = self.runner.run(&command)?;
        if !status.success() {
            return Err(ConvertError::MediaConversionFailed { code: status.code });
        }
        Ok(())
    }
}
