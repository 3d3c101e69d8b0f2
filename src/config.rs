use clap::Parser;

/// Infrastructure-only knobs for a negotiation run. Scenario content (which
/// subjects, rooms, professors) is out of scope for this surface; it comes
/// from `scenario::Scenario::spawn` callers, not from the command line.
#[derive(Debug, Parser)]
#[command(name = "timetabling-negotiation", about = "University timetabling negotiation engine")]
pub struct Config {
    /// Directory the schedule stores write `Horarios_asignados.json` and
    /// `Horarios_salas.json` into.
    #[arg(long, default_value = "agent_output")]
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { output_dir: "agent_output".to_string() }
    }
}
