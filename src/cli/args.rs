use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "fitclock")]
#[command(about = "An interval workout timer and fitness tracker for the terminal")]
#[command(long_about = "fitclock - interval workouts in the terminal

Runs work/rest interval workouts, estimates calories from MET values and
your body weight, and keeps a history of every session.

QUICK START:
  fitclock plan list                 Show preset and custom workouts
  fitclock workout run \"HIIT Blast\"  Start a workout
  fitclock workout resume            Continue a minimized workout
  fitclock history report            Dashboard for the last 7 days

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  fitclock <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Log at debug level (overridden by FITCLOCK_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run, resume and inspect workouts
    ///
    /// # Examples
    ///
    ///   fitclock workout run "HIIT Blast"
    ///   fitclock workout run leg-day --weight 82
    ///   fitclock workout resume
    ///   fitclock workout status
    #[command(alias = "w")]
    Workout(WorkoutArgs),

    /// Browse and build workout plans
    ///
    /// Presets ship with fitclock and are read-only. Custom plans are
    /// stored as YAML files in ~/.fitclock/workouts/.
    ///
    /// # Examples
    ///
    ///   fitclock plan new "Leg Day"
    ///   fitclock plan add leg-day squats --sets 4 --work 45 --rest 15
    ///   fitclock plan move leg-day 3 1
    ///   fitclock plan estimate leg-day
    #[command(alias = "p")]
    Plan(PlanArgs),

    /// Browse the exercise catalog
    ///
    /// # Examples
    ///
    ///   fitclock exercise list --category core
    ///   fitclock exercise show burpees
    ///   fitclock exercise add "Battle Ropes" --category cardio --met 10.3
    ///   fitclock exercise remove battle-ropes
    #[command(alias = "e")]
    Exercise(ExerciseArgs),

    /// Workout history and reports
    ///
    /// # Examples
    ///
    ///   fitclock history list -n 20
    ///   fitclock history report month
    #[command(alias = "h")]
    History(HistoryArgs),

    /// Show or change your profile
    ///
    /// Body weight feeds the calorie estimate.
    ///
    /// # Examples
    ///
    ///   fitclock profile show
    ///   fitclock profile set --weight 72.5 --name Sam
    Profile(ProfileArgs),

    /// Generate shell completions
    ///
    /// Example: fitclock completions zsh > ~/.zsh/completions/_fitclock
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments shared by `workout run` and `workout resume`.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct RunnerArgs {
    /// Print phase changes line by line instead of the full-screen timer
    #[arg(long)]
    pub plain: bool,

    /// Milliseconds per tick
    #[arg(long, hide = true)]
    pub tick_ms: Option<u64>,

    /// Minimize after this many ticks (plain mode)
    #[arg(long, hide = true)]
    pub minimize_after: Option<u64>,
}

/// Arguments for workouts.
#[derive(Args)]
pub struct WorkoutArgs {
    #[command(subcommand)]
    pub command: WorkoutCommands,
}

/// Workout subcommands.
#[derive(Subcommand)]
pub enum WorkoutCommands {
    /// Start a workout
    ///
    /// Keys in the timer: space pause/resume, s or → skip phase,
    /// m minimize, q stop and record, x or Esc stop without recording.
    Run {
        /// Preset or custom workout name
        plan: String,

        /// Body weight in kg for this session (defaults to your profile)
        #[arg(long)]
        weight: Option<f64>,

        #[command(flatten)]
        runner: RunnerArgs,
    },

    /// Continue the minimized workout
    Resume {
        #[command(flatten)]
        runner: RunnerArgs,
    },

    /// Show the minimized workout, if any
    Status,

    /// Throw away the minimized workout
    Discard {
        /// Record the progress made so far in history
        #[arg(long)]
        record: bool,
    },
}

/// Arguments for plans.
#[derive(Args)]
pub struct PlanArgs {
    #[command(subcommand)]
    pub command: PlanCommands,
}

/// Length and set overrides for a plan entry.
#[derive(Args, Clone, Debug, Default)]
pub struct EntryArgs {
    /// Number of sets
    #[arg(long, short = 's')]
    pub sets: Option<u32>,

    /// Work length (e.g. 40, 45s, 1m)
    #[arg(long, short = 'w')]
    pub work: Option<String>,

    /// Rest length (e.g. 20, 15s, 0)
    #[arg(long, short = 'r')]
    pub rest: Option<String>,
}

/// Plan subcommands.
#[derive(Subcommand)]
pub enum PlanCommands {
    /// List preset and custom workouts
    #[command(alias = "ls")]
    List,

    /// Show a workout's exercises and estimate
    Show {
        /// Workout name
        name: String,
    },

    /// Estimate duration and calories
    Estimate {
        /// Workout name
        name: String,

        /// Body weight in kg (defaults to your profile)
        #[arg(long)]
        weight: Option<f64>,
    },

    /// Create an empty custom workout
    New {
        /// Workout name
        name: String,

        /// Short description
        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Append an exercise to a custom workout
    ///
    /// Unset lengths use the defaults from the `timer` config section.
    Add {
        /// Workout name
        plan: String,

        /// Exercise id (see `fitclock exercise list`)
        exercise: String,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Remove the exercise at a position (1-based)
    #[command(alias = "rm")]
    Remove {
        /// Workout name
        plan: String,

        /// Position of the exercise
        position: usize,
    },

    /// Move an exercise to another position (1-based)
    #[command(alias = "mv")]
    Move {
        /// Workout name
        plan: String,

        /// Current position
        from: usize,

        /// New position
        to: usize,
    },

    /// Change sets or lengths of the exercise at a position (1-based)
    Update {
        /// Workout name
        plan: String,

        /// Position of the exercise
        position: usize,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Delete a custom workout
    Delete {
        /// Workout name
        name: String,
    },
}

/// Arguments for exercises.
#[derive(Args)]
pub struct ExerciseArgs {
    #[command(subcommand)]
    pub command: ExerciseCommands,
}

/// Exercise subcommands.
#[derive(Subcommand)]
pub enum ExerciseCommands {
    /// List exercises
    #[command(alias = "ls")]
    List {
        /// Only this category (cardio, strength, core, plyometric, flexibility)
        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Filter by id or name
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show one exercise
    Show {
        /// Exercise id
        id: String,
    },

    /// Add a custom exercise
    Add {
        /// Display name
        name: String,

        /// Id (derived from the name when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Category
        #[arg(long, short = 'c')]
        category: String,

        /// MET value
        #[arg(long, short = 'm')]
        met: f64,

        /// Short description
        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Remove a custom exercise
    #[command(alias = "rm")]
    Remove {
        /// Exercise id
        id: String,
    },
}

/// Arguments for history.
#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommands,
}

/// History subcommands.
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Recent workouts
    #[command(alias = "ls")]
    List {
        /// Number of sessions to show
        #[arg(long, short = 'n', default_value = "10")]
        limit: usize,
    },

    /// Dashboard over a period (today, week, month, all)
    Report {
        #[arg(default_value = "week")]
        period: String,
    },

    /// Delete one session by id
    Delete {
        /// Session id
        id: i64,
    },

    /// Delete all history
    Clear {
        /// Required to actually delete
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for the profile.
#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommands,
}

/// Profile subcommands.
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the profile
    Show,

    /// Update name or weight
    Set {
        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Body weight in kg
        #[arg(long)]
        weight: Option<f64>,
    },
}
