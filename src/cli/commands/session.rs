use dialoguer::{theme::ColorfulTheme, Password};

use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::public(
            "login",
            "Déverrouiller la session",
            "login [mot de passe]",
            cmd_login,
        ),
        CommandEntry::public("logout", "Verrouiller la session", "logout", cmd_logout),
    ]
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !context.gate.requires_password() {
        context.auth = context.gate.open_context(context.clock.now());
        output::info("Accès libre : aucun mot de passe configuré.");
        context.auto_load_feed();
        return Ok(());
    }

    let attempt = match (args.first(), context.mode) {
        (Some(password), _) => password.to_string(),
        (None, CliMode::Interactive) => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Mot de passe")
            .interact()?,
        (None, CliMode::Script) => {
            return Err(CommandError::InvalidArguments(
                "usage : login <mot de passe>".into(),
            ))
        }
    };

    let auth = context.gate.authenticate(&attempt, context.clock.now())?;
    context.auth = Some(auth);
    output::success("Accès autorisé.");
    context.auto_load_feed();
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.gate.requires_password() {
        output::info("Accès libre : rien à verrouiller.");
        return Ok(());
    }
    context.auth = None;
    output::success("Session verrouillée.");
    Ok(())
}
