use std::path::PathBuf;

use clap::Parser;

use crate::config::PartialConfig;

/// Bulk-create Clockify time entries for every working day of a month
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    /// month to fill (1-12)
    ///
    /// Defaults to the current month.
    pub month: Option<u32>,

    /// year to fill
    ///
    /// Defaults to the current year.
    pub year: Option<i32>,

    /// description attached to every created entry
    ///
    /// Overrides the description stored in the config file for this run.
    #[arg(short, long)]
    pub description: Option<String>,

    /// first working hour of the day (0-23)
    #[arg(long)]
    pub start_hour: Option<u32>,

    /// last working hour of the day (0-23)
    ///
    /// Must be later than the start hour.  With a lunch break enabled the
    /// working hours also have to leave room for the 11:30-14:00 lunch band.
    #[arg(long)]
    pub end_hour: Option<u32>,

    /// book one entry per day instead of splitting around a lunch break
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_lunch: bool,

    /// persist the values given on the command line as new defaults
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub save: bool,

    /// compute and display the entries without calling the API
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub simulate: bool,

    /// read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// increase the verbosity
    ///
    /// This flag can be used multiple times to increase the amount of
    /// information produced by timefill
    #[arg(short, long, action = clap::ArgAction::Count, help_heading = "Logging")]
    pub verbose: u8,

    /// output no logging
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Logging")]
    pub quiet: bool,
}

impl Arguments {
    /// Lays the command line flags over the stored defaults.  Whatever is
    /// still missing afterwards gets collected interactively.
    pub fn merge_over(&self, stored: PartialConfig) -> PartialConfig {
        PartialConfig {
            workspace_id: stored.workspace_id,
            project_id: stored.project_id,
            auth_token: stored.auth_token,
            description: self.description.clone().or(stored.description),
            start_hour: self.start_hour.or(stored.start_hour),
            end_hour: self.end_hour.or(stored.end_hour),
            lunch_break: if self.no_lunch {
                Some(false)
            } else {
                stored.lunch_break
            },
            base_url: stored.base_url,
        }
    }
}
