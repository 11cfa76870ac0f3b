//! `educred agent` — free-text command interpretation.

use clap::Args;
use educred_agent::{interpret, Route};

#[derive(Args, Debug)]
pub struct AgentArgs {
    /// The command text.
    #[arg(required = true, trailing_var_arg = true)]
    pub command: Vec<String>,
}

pub fn run(args: AgentArgs) -> anyhow::Result<()> {
    let reply = interpret(&args.command.join(" "));
    println!("{}", reply.message);
    if let Some(route) = reply.action {
        println!("route: {}", route_label(&route));
    }
    Ok(())
}

fn route_label(route: &Route) -> String {
    match route {
        Route::MyCertificates => "my-certificates".into(),
        Route::Verify { token: Some(id) } => format!("verify (token {id})"),
        Route::Verify { token: None } => "verify".into(),
        Route::Issue => "issue".into(),
        Route::BulkIssue => "bulk-issue".into(),
        Route::Home => "home".into(),
        Route::Admin => "admin".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use educred_core::TokenId;

    #[test]
    fn route_labels_are_stable() {
        assert_eq!(route_label(&Route::BulkIssue), "bulk-issue");
        assert_eq!(
            route_label(&Route::Verify {
                token: Some(TokenId(9))
            }),
            "verify (token 9)"
        );
    }
}
