use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::PipelineStage;

pub mod commands;

#[derive(Parser)]
#[command(name = "talent-map")]
#[command(about = "Client-facing hiring pipeline board over a candidate sheet")]
#[command(long_about = "Talent Map shows classified candidates per hiring process and stage, \
                       moves them through the pipeline, and keeps interview reports attached \
                       to each candidate. Get started with 'talent-map processes'.")]
pub struct Cli {
    /// Extra configuration file layered over talent-map.toml
    #[arg(long, global = true, help = "Path to an additional TOML configuration file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the board of one process at one stage
    Board {
        /// Hiring process to show
        #[arg(long, short = 'p', help = "Process name, as listed by 'talent-map processes'")]
        process: String,
        /// Pipeline stage to show
        #[arg(long, short = 's', value_enum, default_value = "new", help = "Stage column to show")]
        stage: PipelineStage,
    },
    /// List the hiring processes present in the sheet
    Processes,
    /// Move a candidate one stage forward
    Advance {
        /// Candidate file name (the Archivo column)
        file_id: String,
    },
    /// Move a candidate to the rejected stage
    Reject {
        /// Candidate file name (the Archivo column)
        file_id: String,
    },
    /// Bring a rejected candidate back to the new stage
    Restore {
        /// Candidate file name (the Archivo column)
        file_id: String,
    },
    /// Upload an interview report (PDF) and attach it to a candidate
    Attach {
        /// Candidate file name (the Archivo column)
        file_id: String,
        /// PDF report to upload
        report: PathBuf,
        /// Stage board the upload is made from
        #[arg(long, short = 's', value_enum, help = "Board the report is attached from (interview stages only)")]
        stage: PipelineStage,
    },
    /// List the interview reports attached to a candidate
    Interviews {
        /// Candidate file name (the Archivo column)
        file_id: String,
    },
    /// Write a default configuration and an empty local sheet
    Init {
        /// Overwrite an existing talent-map.toml
        #[arg(long, help = "Overwrite existing configuration")]
        force: bool,
        /// Show what would be created without making changes
        #[arg(long, help = "Show what would be created without making changes")]
        dry_run: bool,
    },
}
