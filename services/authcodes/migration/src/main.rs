use sea_orm_migration::prelude::*;

use linkcode_authcodes_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
