//! Service commands

use crate::error::{CliError, CliResult};
use crate::output::{self, print_error, print_success, print_warning, OutputFormat};
use clap::Subcommand;
use colored::*;
use plancks_gateway::ServiceController;
use plancks_types::{ServiceRequest, ServiceState};
use tabled::Tabled;

/// Service subcommands
#[derive(Subcommand)]
pub enum ServiceCommands {
    /// List replicated services with running/required replicas
    #[command(alias = "ls")]
    List,

    /// Create a replicated service
    Create {
        /// Service name
        name: String,

        /// Container image
        #[arg(short, long)]
        image: String,

        /// Number of replicas
        #[arg(short, long, default_value = "1")]
        replicas: u64,

        /// Memory limit in MiB (0 for none)
        #[arg(short, long, default_value = "0")]
        memory: u64,
    },

    /// Remove services by name or ID
    #[command(alias = "rm")]
    Remove {
        /// Service names or IDs
        #[arg(required_unless_present = "all")]
        services: Vec<String>,

        /// Remove every replicated service
        #[arg(long, conflicts_with = "services")]
        all: bool,
    },
}

/// Table row for service display
#[derive(Debug, Tabled)]
struct ServiceRow {
    /// Service ID (short form)
    id: String,
    /// Service name
    name: String,
    /// Image reference
    image: String,
    /// Running/required replicas
    replicas: String,
}

impl From<&ServiceState> for ServiceRow {
    fn from(s: &ServiceState) -> Self {
        Self {
            id: truncate_id(s.id.as_str()),
            name: s.name.clone(),
            image: s.image.clone(),
            replicas: format_replicas(s),
        }
    }
}

/// Running/required replicas, green once the service has converged
fn format_replicas(s: &ServiceState) -> String {
    let replicas = format!("{}/{}", s.replicas_running, s.replicas_required);
    if s.is_converged() {
        replicas.green().to_string()
    } else {
        replicas.yellow().to_string()
    }
}

fn truncate_id(id: &str) -> String {
    id.chars().take(12).collect()
}

/// Pick the services named by `wanted`, matching name or ID.
///
/// Returns the selection and the entries that matched nothing.
fn select_services<'a>(
    states: &'a [ServiceState],
    wanted: &'a [String],
) -> (Vec<ServiceState>, Vec<&'a str>) {
    let mut selected = Vec::new();
    let mut unmatched = Vec::new();

    for w in wanted {
        let matches: Vec<_> = states
            .iter()
            .filter(|s| &s.name == w || s.id.as_str() == w)
            .collect();
        if matches.is_empty() {
            unmatched.push(w.as_str());
        }
        for state in matches {
            if !selected.contains(state) {
                selected.push(state.clone());
            }
        }
    }

    (selected, unmatched)
}

/// Execute a service command
pub async fn execute(
    command: ServiceCommands,
    controller: &ServiceController,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        ServiceCommands::List => {
            let states = controller.service_states().await?;
            output::print_output::<ServiceState, ServiceRow>(&states, format)
        }

        ServiceCommands::Create {
            name,
            image,
            replicas,
            memory,
        } => {
            let request = ServiceRequest::new(name, image, replicas).with_memory_limit_mib(memory);
            let id = controller.create_service(&request).await?;
            print_success(&format!("Created service {} ({})", request.name, id));
            Ok(())
        }

        ServiceCommands::Remove { services, all } => {
            let states = controller.service_states().await?;
            let selected = if all {
                states
            } else {
                let (selected, unmatched) = select_services(&states, &services);
                for name in unmatched {
                    print_warning(&format!("No such service: {}", name));
                }
                selected
            };

            if selected.is_empty() {
                print_warning("Nothing to remove");
                return Ok(());
            }

            for state in &selected {
                tracing::info!(service_id = %state.id, name = %state.name, "Selected for removal");
            }

            let removed = controller.remove_services(&selected).await;
            if removed < selected.len() {
                let failed = selected.len() - removed;
                print_error(&format!("{} service(s) could not be removed", failed));
                return Err(CliError::RemoveFailed {
                    failed,
                    requested: selected.len(),
                });
            }

            print_success(&format!("Removed {} service(s)", removed));
            Ok(())
        }
    }
}
