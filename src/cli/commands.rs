// CLI command implementations
use anyhow::{anyhow, Context, Result};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use tune_transporter::slskd::SlskdEvent;
use tune_transporter::transfer::{
    cleanup_directory, list_directories, list_files, plan_transfer, read_file_metadata, Transfer,
    TransferError, TransferResult,
};

use super::config::{BatchOptions, Commands, Config, DOWNLOADS_DIR_ENV_VAR, MUSIC_DIR_ENV_VAR};
use super::output::OutputFormatter;
use super::select::choose_directory;

/// Run the selected subcommand
///
/// Returns `Ok(false)` when some files could not be processed.
pub fn run(config: &Config) -> Result<bool> {
    let formatter = OutputFormatter::new(config.format, config.quiet);

    match &config.command {
        Some(Commands::Read { files }) => command_read(files, &formatter),
        Some(Commands::File { file }) => {
            let mut filer = Filer::new(music_dir(config)?, config.dry_run, &formatter);
            command_file(file, &mut filer)
        }
        Some(Commands::Event { json, batch }) => {
            let mut filer = Filer::new(music_dir(config)?, config.dry_run, &formatter);
            command_event(json, config.downloads_dir.as_deref(), batch, &mut filer)
        }
        Some(Commands::Batch { directory, batch }) => {
            let mut filer = Filer::new(music_dir(config)?, config.dry_run, &formatter);
            command_batch(directory, batch, &mut filer)
        }
        Some(Commands::Select { batch }) => command_select(config, batch, &formatter),
        None => command_select(config, &BatchOptions::default(), &formatter),
    }
}

fn music_dir(config: &Config) -> Result<&Path> {
    config.music_dir.as_deref().ok_or_else(|| {
        anyhow!("Missing music library root: pass --music-dir or set {MUSIC_DIR_ENV_VAR}")
    })
}

fn downloads_dir(config: &Config) -> Result<&Path> {
    config.downloads_dir.as_deref().ok_or_else(|| {
        anyhow!("Missing downloads directory: pass --downloads-dir or set {DOWNLOADS_DIR_ENV_VAR}")
    })
}

/// Moves tracks into one library root
///
/// On a dry run nothing moves, so targets planned earlier in the run are
/// remembered to catch two files that would land on the same path.
struct Filer<'a> {
    library_root: &'a Path,
    dry_run: bool,
    formatter: &'a OutputFormatter,
    planned: HashSet<PathBuf>,
}

impl<'a> Filer<'a> {
    fn new(library_root: &'a Path, dry_run: bool, formatter: &'a OutputFormatter) -> Self {
        Self {
            library_root,
            dry_run,
            formatter,
            planned: HashSet::new(),
        }
    }

    /// Plan and, unless this is a dry run, perform one move
    fn file_track(&mut self, file: &Path) -> TransferResult<Transfer> {
        let transfer = plan_transfer(file, self.library_root)?;
        tracing::debug!("{}: {}", file.display(), transfer.metadata);

        if self.dry_run {
            transfer.validate()?;
            if !self.planned.insert(transfer.target.clone()) {
                return Err(TransferError::TargetExists(transfer.target));
            }
        } else {
            transfer.execute()?;
        }

        self.formatter.moved(&transfer, self.dry_run);
        Ok(transfer)
    }
}

/// Print the tags of each file
fn command_read(files: &[PathBuf], formatter: &OutputFormatter) -> Result<bool> {
    let mut stdout = io::stdout().lock();
    let mut all_read = true;

    for file in files {
        match read_file_metadata(file) {
            Ok(metadata) => formatter.write_track(file, &metadata, &mut stdout)?,
            Err(e) => {
                formatter.failed(&e);
                all_read = false;
            }
        }
    }

    Ok(all_read)
}

/// File a single track
fn command_file(file: &Path, filer: &mut Filer) -> Result<bool> {
    tracing::info!("Single file mode: {}", file.display());

    filer
        .file_track(file)
        .with_context(|| format!("Couldn't file {}", file.display()))?;
    Ok(true)
}

/// File the download directory of an slskd event
///
/// With a downloads directory configured, the event's directory name is
/// looked up there; otherwise its local path is used as is.
fn command_event(
    json: &str,
    downloads: Option<&Path>,
    options: &BatchOptions,
    filer: &mut Filer,
) -> Result<bool> {
    let event = SlskdEvent::from_json(json).context("Couldn't read event")?;
    tracing::info!("Processing event {event} ({})", event.id);

    let directory = match downloads {
        Some(downloads) => downloads.join(event.name()),
        None => event.local_directory().to_path_buf(),
    };

    command_batch(&directory, options, filer)
}

/// Let the user pick a download directory, then file it
fn command_select(
    config: &Config,
    options: &BatchOptions,
    formatter: &OutputFormatter,
) -> Result<bool> {
    let library_root = music_dir(config)?;
    let downloads = downloads_dir(config)?;

    let directories = list_directories(downloads)
        .with_context(|| format!("Couldn't read downloads in {}", downloads.display()))?;
    if directories.is_empty() {
        formatter.failed(format!("No downloads found in {}", downloads.display()));
        return Ok(false);
    }

    let chosen = choose_directory(
        &directories,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
    )?;

    match chosen {
        Some(directory) => {
            tracing::info!("Selected {}", directory.display());
            let mut filer = Filer::new(library_root, config.dry_run, formatter);
            command_batch(&directory, options, &mut filer)
        }
        None => Ok(true),
    }
}

/// File every matching track of a directory
///
/// A file that fails is reported and skipped; the rest of the batch still runs.
fn command_batch(directory: &Path, options: &BatchOptions, filer: &mut Filer) -> Result<bool> {
    let formatter = filer.formatter;
    let files = list_files(directory, &options.pattern)
        .with_context(|| format!("Couldn't read directory contents of {}", directory.display()))?;

    if files.is_empty() {
        formatter.failed(format!(
            "No files matching {} found in {}",
            options.pattern,
            directory.display()
        ));
        return Ok(false);
    }

    formatter.note(format!("Processing {} files...", files.len()));

    let mut moved = 0;
    let mut failed = 0;

    for file in &files {
        match filer.file_track(file) {
            Ok(_) => moved += 1,
            Err(e) => {
                tracing::warn!("Skipping {} due to error: {e}", file.display());
                formatter.failed(&e);
                failed += 1;
            }
        }
    }

    formatter.note(format!("Completed: {moved} moved, {failed} failed"));

    if failed > 0 {
        return Ok(false);
    }

    if options.cleanup {
        if filer.dry_run {
            formatter.note(format!("Would remove {}", directory.display()));
        } else if let Err(e) = cleanup_directory(directory, &options.pattern) {
            formatter.failed(format!("Cleanup aborted: {e}"));
            return Ok(false);
        }
    }

    Ok(true)
}
