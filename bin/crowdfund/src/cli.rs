use std::path::PathBuf;

use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use crowdfund_config::AppConfig;
use crowdfund_pages::{
    AdminPage, CampaignDetailPage, CampaignFilter, CampaignsPage, CreateCampaignForm,
    CreateCampaignPage, HomePage, KycForm, KycPage, Notice, Outcome, Route,
    components::{Footer, Navbar},
};
use crowdfund_provider::{JsonRpcClient, LocalSigner, ProviderWatcher, RpcWallet};
use crowdfund_session::WalletContext;
use futures::{FutureExt, StreamExt};

type Context = WalletContext<RpcWallet>;

#[derive(Parser, Debug)]
#[command(name = "crowdfund")]
#[command(about = "Client for the KYC-gated crowdfunding contracts")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file, TOML or JSON.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON-RPC endpoint.
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Chain id of the target network.
    #[arg(long, global = true)]
    pub chain_id: Option<u64>,

    /// Hex signing key. Without one the node's accounts are used.
    #[arg(long, global = true, env = "CROWDFUND_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Address allowed to review KYC requests.
    #[arg(long, global = true)]
    pub admin: Option<Address>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Landing page.
    Home,
    /// List campaigns.
    Campaigns {
        #[arg(long, default_value_t = CampaignFilter::All)]
        filter: CampaignFilter,
    },
    /// Show one campaign.
    Campaign { id: u64 },
    /// Open a new campaign.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Goal in the native currency.
        #[arg(long)]
        goal: String,
    },
    /// Contribute to a campaign.
    Contribute { id: u64, amount: String },
    /// Withdraw the funds of a completed campaign.
    Withdraw { id: u64 },
    /// KYC status and submission.
    #[command(subcommand)]
    Kyc(KycCommand),
    /// Review KYC requests.
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Ask the wallet to switch to the configured network.
    SwitchNetwork,
    /// Follow account and network changes until interrupted.
    Watch,
}

#[derive(Subcommand, Debug)]
pub(crate) enum KycCommand {
    /// Show the KYC status of the connected account.
    Status,
    /// Submit KYC details.
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        cnic: String,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum AdminCommand {
    /// List pending KYC requests.
    Pending,
    /// Approve a KYC request.
    Approve { user: Address },
    /// Reject a KYC request.
    Reject { user: Address },
}

impl Cli {
    pub(crate) fn load_config(&self) -> eyre::Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?.with_env()?;

        if let Some(ref url) = self.rpc_url {
            config.network.rpc_url = url.clone();
        }
        if let Some(chain_id) = self.chain_id {
            config.network.chain_id = chain_id;
        }
        if let Some(ref key) = self.private_key {
            config.wallet.private_key = Some(key.clone());
        }
        if let Some(admin) = self.admin {
            config.admin_wallet = Some(admin);
        }
        config.validate()?;

        Ok(config)
    }

    fn wallet(config: &AppConfig) -> eyre::Result<RpcWallet> {
        let client = JsonRpcClient::new(config.network.rpc_url.clone())?;
        let wallet = RpcWallet::new(client);
        Ok(match config.wallet.private_key_bytes()? {
            Some(secret) => wallet.with_signer(LocalSigner::from_bytes(&secret)?),
            None => wallet,
        })
    }

    pub(crate) async fn run(self) -> eyre::Result<()> {
        let config = self.load_config()?;
        let wallet = Self::wallet(&config)?;
        tracing::debug!(rpc = %config.network.rpc_url, chain_id = config.network.chain_id, "starting");

        let mut context = WalletContext::new(wallet.clone(), &config);
        if matches!(self.command, Commands::SwitchNetwork) {
            context.switch_network().await?;
            println!("Switched to {}", config.network.chain_name);
            return Ok(());
        }
        let mut updates = context.subscribe();
        if let Err(err) = context.connect().await {
            tracing::debug!(error = %err, "continuing without a session");
        }
        while let Some(Some(update)) = updates.next().now_or_never() {
            if let Some(notice) = Notice::from_update(&update) {
                println!("{notice}");
            }
        }

        let page = match self.command {
            Commands::Home => Route::Home,
            Commands::Campaigns { .. } => Route::Campaigns,
            Commands::Campaign { id } | Commands::Contribute { id, .. } | Commands::Withdraw { id } => {
                Route::Campaign(id)
            }
            Commands::Create { .. } => Route::CreateCampaign,
            Commands::Kyc(_) => Route::Kyc,
            Commands::Admin(_) => Route::Admin,
            Commands::SwitchNetwork | Commands::Watch => Route::Home,
        };
        let symbol = config.network.symbol.clone();
        println!("{}", Navbar::new(context.session(), context.is_connecting(), &symbol, page));

        match self.command {
            Commands::Home => println!("{}", HomePage::new(context.session())),
            Commands::Campaigns { filter } => {
                let mut list = CampaignsPage::new(symbol);
                list.set_filter(filter);
                if let Err(err) = list.load(context.session()).await {
                    println!("{}", Notice::error(err.to_string()));
                }
                println!("{list}");
            }
            Commands::Campaign { id } => {
                let detail = load_detail(&context, id, symbol).await;
                println!("{}", detail.render(context.session().account));
            }
            Commands::Create { title, description, goal } => {
                let form = CreateCampaignForm { title, description, goal };
                let mut create = CreateCampaignPage::new(form);
                report(create.submit(&mut context).await);
            }
            Commands::Contribute { id, amount } => {
                let mut detail = load_detail(&context, id, symbol).await;
                report(detail.contribute(&mut context, &amount).await);
                println!("{}", detail.render(context.session().account));
            }
            Commands::Withdraw { id } => {
                let mut detail = load_detail(&context, id, symbol).await;
                report(detail.withdraw(&mut context).await);
                println!("{}", detail.render(context.session().account));
            }
            Commands::Kyc(command) => run_kyc(&mut context, command).await,
            Commands::Admin(command) => run_admin(&mut context, command).await,
            Commands::Watch => watch(&mut context, wallet, &config).await,
            Commands::SwitchNetwork => {}
        }

        println!("{}", Footer::new(config.contracts));
        Ok(())
    }
}

async fn load_detail(context: &Context, id: u64, symbol: String) -> CampaignDetailPage {
    let mut detail = CampaignDetailPage::new(id, symbol);
    if let Err(err) = detail.load(context.session()).await {
        println!("{}", Notice::error(err.to_string()));
    }
    detail
}

async fn run_kyc(context: &mut Context, command: KycCommand) {
    match command {
        KycCommand::Status => {
            let page = KycPage::default();
            if let Some(route) = page.load(context).await {
                println!("Redirecting to {route}");
            }
            println!("{}", page.render(context.session()));
        }
        KycCommand::Submit { name, cnic } => {
            let mut page = KycPage::new(KycForm { name, cnic });
            report(page.submit(context).await);
            println!("{}", page.render(context.session()));
        }
    }
}

async fn run_admin(context: &mut Context, command: AdminCommand) {
    let mut page = AdminPage::new();
    let outcome = match command {
        AdminCommand::Pending => None,
        AdminCommand::Approve { user } => Some(page.approve(context, user).await),
        AdminCommand::Reject { user } => Some(page.reject(context, user).await),
    };
    if let Some(outcome) = outcome {
        report(outcome);
    } else if let Err(err) = page.load(context.session()).await {
        println!("{}", Notice::error(err.to_string()));
    }
    println!("{}", page.render(context.session()));
}

async fn watch(context: &mut Context, wallet: RpcWallet, config: &AppConfig) {
    let mut updates = context.subscribe();
    let printer = tokio::spawn(async move {
        while let Some(update) = updates.next().await {
            if let Some(notice) = Notice::from_update(&update) {
                println!("{notice}");
            }
        }
    });
    let events = wallet.events().subscribe();
    let watcher =
        ProviderWatcher::new(wallet.clone(), wallet.events().clone(), config.wallet.poll_interval());
    let polling = tokio::spawn(watcher.run());

    tracing::info!(interval = ?config.wallet.poll_interval(), "watching wallet");
    tokio::select! {
        _ = context.run_events(events) => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(err) = result {
                tracing::warn!(error = %err, "failed to listen for interrupt");
            }
            tracing::info!("shutting down");
        }
    }
    polling.abort();
    printer.abort();
}

fn report(outcome: Outcome) {
    for notice in &outcome.notices {
        println!("{notice}");
    }
    if let Some(route) = outcome.redirect {
        println!("-> {route}");
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_have_help() {
        let command = Cli::command();
        for arg in command.get_arguments().filter(|arg| arg.is_global_set()) {
            assert!(arg.get_help().is_some(), "--{} has no help", arg.get_id());
        }
    }
}
