use anyhow::{Context, Result};
use postgen_core::PostgenConfig;
use postgen_publish::{PostmanClient, Workspace};

pub async fn execute(config: &PostgenConfig) -> Result<()> {
    let client = PostmanClient::new(&config.postman)?;
    let workspaces = client
        .list_workspaces()
        .await
        .context("Failed to list workspaces")?;

    for workspace in &workspaces {
        println!("{}", line(workspace));
    }
    Ok(())
}

/// `id<TAB>kind<TAB>name`, with `-` for an unknown kind.
fn line(workspace: &Workspace) -> String {
    format!(
        "{}\t{}\t{}",
        workspace.id,
        workspace.kind.as_deref().unwrap_or("-"),
        workspace.name
    )
}
