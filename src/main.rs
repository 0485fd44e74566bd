use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::converter::{FfmpegConverter, RasterConverter, SystemRunner};

mod converter;
mod error;
mod policy;
mod tools;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(after_help = "Example: fileconvert input.jpg png")]
struct Args {
    /// File to convert
    input: PathBuf,

    /// Target type, without the leading dot (e.g. png)
    #[arg(required_unless_present = "list_targets")]
    output_type: Option<String>,

    /// Print the types the input can be converted to and exit
    #[arg(long)]
    list_targets: bool,

    /// Directory for the converted file [default: current directory]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// ffmpeg executable to use instead of the one on PATH
    #[arg(long, env = "FILECONVERT_FFMPEG")]
    ffmpeg: Option<PathBuf>,
}

fn list_targets(input: &Path) -> Result<()> {
    let ext = policy::validate_input(input)?;
    for target in policy::permitted_targets(&ext).unwrap_or_default() {
        println!("{}", target);
    }
    Ok(())
}

fn convert_file(
    input: &Path,
    output_type: &str,
    output_dir: Option<&Path>,
    ffmpeg: Option<PathBuf>,
) -> Result<PathBuf> {
    let output_type = output_type.to_lowercase();
    let request = policy::validate_request(input, &output_type)?;
    log::debug!("validated {:?}", request);

    if let Some(dir) = output_dir {
        if !dir.is_dir() {
            anyhow::bail!("output directory does not exist: {}", dir.display());
        }
    }

    let output = converter::output_path(&request, output_dir)?;
    println!("Converting {} to {}...", input.display(), output.display());

    let image = RasterConverter::new();
    let media = FfmpegConverter::new(SystemRunner::new(ffmpeg));
    let output = converter::dispatch(&request, output_dir, &image, &media)?;

    println!("Successfully converted to: {}", output.display());
    Ok(output)
}

fn run(args: Args) -> Result<()> {
    if args.list_targets {
        return list_targets(&args.input);
    }

    let output_type = args
        .output_type
        .ok_or_else(|| anyhow::anyhow!("missing output type"))?;

    convert_file(
        &args.input,
        &output_type,
        args.output_dir.as_deref(),
        args.ffmpeg,
    )?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
