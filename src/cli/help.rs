use crate::cli::output;
use crate::cli::registry::{Access, CommandEntry, CommandRegistry};
use crate::cli::render::two_column;

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Commandes disponibles");
    let entries: Vec<(&str, String)> = registry
        .list()
        .into_iter()
        .map(|entry| (entry.name, entry.description.to_string()))
        .collect();
    output::lines(two_column(&entries));
    output::hint("`help <commande>` pour le détail.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Aide : {}", entry.name));
    let access = match entry.access {
        Access::Public => "libre",
        Access::Protected => "après connexion",
    };
    output::lines(two_column(&[
        ("description", entry.description.to_string()),
        ("usage", entry.usage.to_string()),
        ("accès", access.to_string()),
    ]));
}
