//! Main gimbal arm operator console entry point.
//!
//! # Architecture
//!
//! Two threads share the arm:
//!
//!     - The position poller, sampling the arm pose in the background and offering it to the
//!       renderer through the single-slot pose queues.
//!     - The UI loop (this thread), which every render period:
//!         - Executes pending operator commands
//!         - Runs one renderer cycle, logging and redrawing changed poses
//!         - Prints new notifications
//!
//! Operator input is read on a third thread so the UI loop never blocks on the prompt.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::{debug, info, warn};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use arm_if::eqpt::{ArmController, SimArm};
use console_lib::{
    axis_ctrl::AxisControls,
    cmd_processor,
    console_cmd::ConsoleCmd,
    data_store::DataStore,
    notifications::NotificationLog,
    params::ConsoleExecParams,
    poller::PositionPoller,
    pose_queue::pose_channel,
    position_log::PositionLog,
    projector::Wireframe,
    renderer::{PoseRenderer, WireframeSink},
};
use util::{
    host,
    logger::{logger_init, LevelFilter, LogLevels},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const PROMPT: &str = "arm $ ";

/// Session-relative path of the prompt history.
const HISTORY_FILE: &str = "history.txt";

/// Session-relative path the latest wireframe is saved to.
const WIREFRAME_FILE: &str = "render/wireframe.json";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command line arguments of the console executable.
#[derive(Debug, StructOpt)]
#[structopt(name = "console_exec", about = "Gimbal arm operator console")]
struct Args {
    /// Parameter file to use instead of `params/console_exec.toml` in the software root.
    #[structopt(long, parse(from_os_str))]
    params: Option<PathBuf>,

    /// Start without connecting to the arm.
    #[structopt(long)]
    offline: bool,

    /// Minimum level written to the session log file.
    #[structopt(long, default_value = "debug")]
    level: LevelFilter,
}

/// Display sink which keeps the latest wireframe in the session directory.
struct SessionSink {
    session: Session,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let args = Args::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("console_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(
        LogLevels {
            file: args.level,
            ..LogLevels::default()
        },
        &session,
    )
    .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Gimbal Arm Operator Console\n");
    info!("Running on: {}", host::describe());
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI arguments: {:?}", args);

    // ---- LOAD PARAMETERS ----

    let params: ConsoleExecParams = match args.params {
        Some(ref path) => util::params::load_path::<ConsoleExecParams, _>(path),
        None => util::params::load("console_exec.toml"),
    }
    .wrap_err("Could not load console params")?;

    params
        .validate()
        .wrap_err("Console params are invalid")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE EQUIPMENT ----

    let sim = Arc::new(match params.sim_slew_deg {
        Some(slew) => SimArm::new().with_slew(slew),
        None => SimArm::new(),
    });
    let arm: Arc<dyn ArmController> = sim.clone();

    if args.offline {
        info!("Offline, the arm will not be connected");
    } else {
        match arm.connect() {
            Ok(()) => info!("Arm connected"),
            Err(e) => warn!("Could not connect to the arm, continuing offline: {}", e),
        }
    }

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let notifications = Arc::new(NotificationLog::new());

    let controls = AxisControls::new(
        params.pitch.clone(),
        params.yaw.clone(),
        params.roll.clone(),
        arm.clone(),
        notifications.clone(),
    );

    let (pose_sender, pose_receiver) = pose_channel();

    let position_log = PositionLog::open(session.path(&params.position_log_file))
        .wrap_err("Failed to open the position log")?;

    let mut renderer = PoseRenderer::new(
        pose_receiver,
        position_log,
        SessionSink {
            session: session.clone(),
        },
    );

    // The poller runs until the process exits, its handle is not needed
    PositionPoller::new(
        arm.clone(),
        controls.clone(),
        notifications.clone(),
        pose_sender,
        Duration::from_secs_f64(params.poll_period_s),
    )
    .spawn()
    .wrap_err("Failed to start the position poller")?;

    let mut ds = DataStore::new(arm, Some(sim), controls, notifications);

    info!("Module initialisation complete\n");

    // ---- OPERATOR INPUT ----

    let (line_sender, line_receiver) = unbounded();
    let history_path = session.path(HISTORY_FILE);

    thread::Builder::new()
        .name(String::from("console_input"))
        .spawn(move || input_thread(line_sender, history_path))
        .wrap_err("Failed to start the console input thread")?;

    // Show the initial pose
    renderer.redraw();

    // ---- MAIN LOOP ----

    info!("Beginning main loop\n");

    let cycle_period = Duration::from_secs_f64(params.render_period_s);

    while !ds.exit_requested {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // ---- OPERATOR COMMANDS ----

        process_input(&mut ds, &line_receiver);

        // ---- RENDERING ----

        renderer.cycle();

        for line in ds.notifications.take_unshown() {
            println!("{}", line);
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        ds.cycle_end();
    }

    // ---- SHUTDOWN ----

    info!(
        "{} position records written, last pose drawn {}",
        renderer.log().num_records(),
        renderer.rendered()
    );

    ds.arm.close();
    session.exit();

    info!("End of execution");

    Ok(())
}

/// Execute every line the operator has entered since the last cycle.
fn process_input(ds: &mut DataStore, lines: &Receiver<String>) {
    loop {
        let line = match lines.try_recv() {
            Ok(l) => l,
            Err(TryRecvError::Empty) => break,
            // Input thread gone, nothing more can arrive
            Err(TryRecvError::Disconnected) => {
                if !ds.exit_requested {
                    info!("Console input closed, exiting");
                    ds.exit_requested = true;
                }
                break;
            }
        };

        match ConsoleCmd::parse_line(&line) {
            Ok(Some(cmd)) => cmd_processor::exec(ds, &cmd),
            Ok(None) => (),
            // Covers help output as well as genuine parse errors
            Err(e) => println!("{}", e.message),
        }
    }
}

/// Read lines from the prompt and forward them to the UI loop.
fn input_thread(sender: Sender<String>, history_path: PathBuf) {
    let mut editor = match DefaultEditor::new() {
        Ok(e) => e,
        Err(e) => {
            warn!("Could not start the console prompt: {}", e);
            return;
        }
    };

    if editor.load_history(&history_path).is_err() {
        debug!("No prompt history found");
    }

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if let Err(e) = editor.add_history_entry(line.as_str()) {
                    debug!("Could not add prompt history entry: {}", e);
                }
                if sender.send(line).is_err() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                warn!("Console prompt error: {}", e);
                break;
            }
        }
    }

    if let Err(e) = editor.save_history(&history_path) {
        warn!("Could not save prompt history: {}", e);
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl WireframeSink for SessionSink {
    fn draw(&mut self, frame: &Wireframe) {
        debug!("Wireframe drawn for {}", frame.pose);
        self.session.save(WIREFRAME_FILE, frame.clone());
    }
}
