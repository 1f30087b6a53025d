//! Binary entrypoint for the damagechat host.
use std::{path::PathBuf, process, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use damagechat::{MonsterStatus, PartyFile, chat_lines, summary};
use tracing_subscriber::{fmt, prelude::*};
use win_keycode::Hotkey;

#[derive(Parser, Debug)]
#[command(
    name = "damagechat",
    about = "Post party damage rankings to game chat on a hotkey",
    version
)]
/// Command-line interface for the `damagechat` binary.
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,

    /// Logging controls
    #[command(flatten)]
    log: logging::LogArgs,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Parse a hotkey descriptor and print its canonical form.
    Check {
        /// Descriptor such as "Shift+Ctrl+P".
        descriptor: String,
    },
    /// Print the chat lines (and optionally the meter) for a party file.
    Preview {
        /// Party snapshot file.
        #[arg(long, value_name = "FILE")]
        party: PathBuf,

        /// Also render the damage meter for this monster.
        #[arg(long, value_name = "NAME")]
        monster: Option<String>,

        /// Monster health for the meter.
        #[arg(long, default_value_t = 0)]
        hp: u64,

        /// Monster maximum health for the meter.
        #[arg(long, default_value_t = 0)]
        max_hp: u64,

        /// Hunt length used for DPS.
        #[arg(long, value_name = "SECS", default_value_t = 0.0)]
        elapsed: f64,
    },
    /// Register the hotkey and pump messages until quit (Windows only).
    Run {
        /// Plugin configuration file.
        #[arg(long, value_name = "FILE")]
        config: PathBuf,

        /// Party snapshot file, re-read on every post.
        #[arg(long, value_name = "FILE")]
        party: PathBuf,

        /// Hotkey that stops the message loop.
        #[arg(long, value_name = "HOTKEY", default_value = "ctrl+shift+end")]
        quit_hotkey: String,

        /// Run each SendInput call on the message-loop thread.
        #[arg(long)]
        ui_thread_injection: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(logging::env_filter_from_spec(&cli.log.spec()))
        .with(fmt::layer().without_time())
        .try_init()
        .ok();

    match cli.command {
        Command::Check { descriptor } => match Hotkey::parse(&descriptor) {
            Ok(hotkey) => println!("{}", hotkey.to_string_canonical()),
            Err(e) => {
                eprintln!("{descriptor}: {e}");
                process::exit(1);
            }
        },
        Command::Preview {
            party,
            monster,
            hp,
            max_hp,
            elapsed,
        } => {
            let members = PartyFile::new(party).load()?;
            for line in chat_lines(&members) {
                println!("{line}");
            }
            if let Some(name) = monster {
                let elapsed = Duration::try_from_secs_f64(elapsed)
                    .context("--elapsed must be a non-negative number of seconds")?;
                let status = MonsterStatus { name, hp, max_hp };
                print!("{}", summary(&status, &members, elapsed));
            }
        }
        Command::Run {
            config,
            party,
            quit_hotkey,
            ui_thread_injection,
        } => host::run(&config, &party, &quit_hotkey, ui_thread_injection)?,
    }
    Ok(())
}

#[cfg(windows)]
/// The Windows message-loop host.
mod host {
    use std::{path::Path, sync::Arc};

    use anyhow::{Context, Result, anyhow};
    use damagechat::{DamageChat, Deps, GameEvents, PartyFile, SystemClipboard};
    use relaykey::{InjectionWorker, MarshalledSink, SendInputSink, Sequencer};
    use tracing::{info, warn};
    use win_hotkey::{Dispatcher, MessageLoop, Registry, Win32Hotkeys};

    /// Install the plugin and pump messages until the quit hotkey fires.
    pub fn run(
        config_path: &Path,
        party: &Path,
        quit_hotkey: &str,
        ui_thread_injection: bool,
    ) -> Result<()> {
        let cfg = config::load_from_path(config_path).map_err(|e| anyhow!(e.pretty()))?;

        let message_loop = MessageLoop::for_current_thread();
        let registry = Arc::new(Registry::new(Arc::new(Win32Hotkeys::for_current_thread())));
        let dispatcher = Dispatcher::new(registry.clone());
        let worker = Arc::new(InjectionWorker::spawn().context("starting injection worker")?);
        let sequencer = if ui_thread_injection {
            Sequencer::new(Arc::new(MarshalledSink::new(
                Arc::new(SendInputSink),
                Arc::new(message_loop.handle()),
            )))
        } else {
            Sequencer::system()
        };

        let plugin = DamageChat::install(
            registry.clone(),
            &cfg,
            Deps {
                game: Arc::new(PartyFile::new(party)),
                clipboard: Arc::new(SystemClipboard),
                worker: worker.clone(),
                sequencer,
                events: GameEvents::new(),
            },
        )?;

        let handle = message_loop.handle();
        registry
            .register(quit_hotkey, move || {
                if let Err(e) = handle.quit() {
                    warn!(error = %e, "quit_failed");
                }
            })
            .with_context(|| format!("registering quit hotkey {quit_hotkey:?}"))?;
        info!(
            hotkey = cfg.descriptor(),
            quit = quit_hotkey,
            "damagechat_running"
        );

        let result = message_loop.run(&dispatcher);

        if let Err(e) = plugin.unload() {
            warn!(error = %e, "unload_failed");
        }
        worker.shutdown();
        registry.unregister_all();
        info!("damagechat_stopped");
        result.context("message loop failed")
    }
}

#[cfg(not(windows))]
/// Stand-in for platforms without global hotkeys.
mod host {
    use std::path::Path;

    use anyhow::{Result, bail};

    /// Always fails: the message-loop host needs Windows.
    pub fn run(_config: &Path, _party: &Path, _quit_hotkey: &str, _ui: bool) -> Result<()> {
        bail!("`damagechat run` is only supported on Windows")
    }
}
