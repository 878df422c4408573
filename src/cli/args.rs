//! CLI argument definitions using clap
//!
//! Commands:
//! - student-records serve [--config <path>]
//! - student-records list
//! - student-records show <id>
//! - student-records add --student-id .. --name .. [--lookup]
//! - student-records edit <id> [field flags] [--lookup]
//! - student-records delete <id> [--yes]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::client::DEFAULT_LOOKUP_URL;
use crate::config::ClientConfig;
use crate::ui::StudentForm;

/// Student records service and client
#[derive(Parser, Debug)]
#[command(name = "student-records")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the student service
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List every student
    List {
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Show one student in detail
    Show {
        id: String,
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Create a student
    Add {
        #[command(flatten)]
        fields: FormFields,
        /// Fill the address from the zipcode before saving
        #[arg(long)]
        lookup: bool,
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Edit a student; only the given fields change
    Edit {
        id: String,
        #[command(flatten)]
        fields: FormFields,
        /// Fill the address from the zipcode before saving
        #[arg(long)]
        lookup: bool,
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Delete a student after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
        #[command(flatten)]
        client: ClientArgs,
    },
}

/// Where the client commands send requests
#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// Base address of the student service
    #[arg(long, env = "STUDENT_API_BASE_URL", default_value = "http://localhost:3000")]
    pub api_url: String,

    /// Base address of the postal-code lookup service
    #[arg(long, default_value = DEFAULT_LOOKUP_URL)]
    pub lookup_url: String,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl ClientArgs {
    pub fn to_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.api_url.clone(),
            postal_lookup_url: self.lookup_url.clone(),
            timeout_secs: self.timeout,
        }
    }
}

/// Form fields settable from the command line
#[derive(Args, Debug, Clone, Default)]
pub struct FormFields {
    #[arg(long)]
    pub student_id: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub zipcode: Option<String>,
    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub neighborhood: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    /// Comma-separated course names
    #[arg(long)]
    pub courses: Option<String>,
}

impl FormFields {
    /// Apply every given field to `form`
    pub fn apply(&self, form: &mut StudentForm) {
        if let Some(v) = &self.student_id {
            form.set_student_id(v.as_str());
        }
        if let Some(v) = &self.name {
            form.set_name(v.as_str());
        }
        if let Some(v) = &self.zipcode {
            form.set_zipcode(v.as_str());
        }
        if let Some(v) = &self.street {
            form.set_street(v.as_str());
        }
        if let Some(v) = &self.neighborhood {
            form.set_neighborhood(v.as_str());
        }
        if let Some(v) = &self.city {
            form.set_city(v.as_str());
        }
        if let Some(v) = &self.state {
            form.set_state(v.as_str());
        }
        if let Some(v) = &self.courses {
            form.set_courses_input(v.as_str());
            form.commit_courses();
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "student-records",
            "add",
            "--student-id",
            "S1",
            "--name",
            "Ana",
            "--courses",
            "Math, Art",
            "--api-url",
            "http://127.0.0.1:3000",
        ])
        .unwrap();

        match cli.command {
            Command::Add {
                fields,
                lookup,
                client,
            } => {
                assert_eq!(fields.student_id.as_deref(), Some("S1"));
                assert!(!lookup);
                assert_eq!(client.to_config().api_base_url, "http://127.0.0.1:3000");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_delete_yes() {
        let cli = Cli::try_parse_from(["student-records", "delete", "abc", "--yes"]).unwrap();
        assert!(matches!(cli.command, Command::Delete { yes: true, .. }));
    }

    #[test]
    fn test_fields_apply_only_given() {
        let mut form = StudentForm::new();
        form.set_city("Campinas");

        let fields = FormFields {
            name: Some("Ana".to_string()),
            courses: Some("Math, ,Art".to_string()),
            ..Default::default()
        };
        fields.apply(&mut form);

        assert_eq!(form.payload().name, "Ana");
        assert_eq!(form.payload().address.city, "Campinas");
        assert_eq!(form.payload().courses, vec!["Math", "Art"]);
    }
}
