/// Render the tenant provisioning CLI script without contacting a device
///
/// Usage:
///   cargo run --bin render_script -- --tenant-name acme --cac-limit 10 --trunk-fqdn acme.sbc.test
///   cargo run --bin render_script -- --template /etc/sbc/tenant.txt ... --output cli.txt

use clap::Parser;
use sbc_gateway::template::{self, TenantFields};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "render_script")]
#[command(about = "Render the tenant provisioning CLI script", long_about = None)]
struct Args {
    /// Template file
    #[arg(long, env = "SBC_TEMPLATE_PATH", default_value = "templates/new_tenant.txt")]
    template: PathBuf,

    /// Value for [TENANT_NAME]
    #[arg(long)]
    tenant_name: String,

    /// Value for [CAC_LIMIT]
    #[arg(long)]
    cac_limit: String,

    /// Value for [TRUNK_FQDN]
    #[arg(long)]
    trunk_fqdn: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let text = template::load(&args.template).await?;
    let script = template::render(
        &text,
        &TenantFields {
            tenant_name: args.tenant_name,
            trunk_fqdn: args.trunk_fqdn,
            cac_limit: args.cac_limit,
        },
    );

    if let Some(output_path) = args.output {
        tokio::fs::write(&output_path, &script).await?;
        eprintln!("Rendered {} to {}", args.template.display(), output_path.display());
    } else {
        print!("{}", script);
    }

    Ok(())
}
