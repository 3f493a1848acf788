//! Deploys the lending protocol and runs read-only scenarios against it.

use odra::casper_types::U256;
use odra::host::{HostEnv, NoArgs};
use odra::prelude::Addressable;
use odra::schema::casper_contract_schema::NamedCLType;

use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt, OdraCli,
};

use ancient_lending::processor::mortgage::{MortgageLedger, MortgageLedgerInitArgs};
use ancient_lending::processor::staking_pool::{StakingPool, StakingPoolInitArgs};
use ancient_lending::state::EconomicParams;
use ancient_lending::token::MockUsdt;

const DEPLOY_GAS: u64 = 300_000_000_000;
const CALL_GAS: u64 = 5_000_000_000;

/// Deploys the settlement token, the staking pool and the mortgage ledger,
/// then registers the ledger with the pool. The deployer acts as treasury.
pub struct ProtocolDeployScript;

impl DeployScript for ProtocolDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer,
    ) -> Result<(), odra_cli::deploy::Error> {
        let params = EconomicParams::default();
        let treasury = env.caller();

        let token = MockUsdt::load_or_deploy(env, NoArgs, container, DEPLOY_GAS)?;
        println!("MockUsdt at {:?}", token.address());

        let mut pool = StakingPool::load_or_deploy(
            env,
            StakingPoolInitArgs {
                token: token.address(),
                params,
            },
            container,
            DEPLOY_GAS,
        )?;
        println!("StakingPool at {:?}", pool.address());

        let ledger = MortgageLedger::load_or_deploy(
            env,
            MortgageLedgerInitArgs {
                token: token.address(),
                staking_pool: pool.address(),
                treasury,
                params,
            },
            container,
            DEPLOY_GAS,
        )?;
        println!("MortgageLedger at {:?}", ledger.address());

        if pool.mortgage_contract().is_none() {
            env.set_gas(CALL_GAS);
            pool.set_mortgage_contract(ledger.address());
            println!("Ledger registered with the staking pool");
        }
        Ok(())
    }
}

/// Prints the staking pool totals and exchange rate
pub struct PoolMetricsScenario;

impl Scenario for PoolMetricsScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(&self, env: &HostEnv, container: &DeployedContractsContainer, _args: Args) -> Result<(), Error> {
        let pool = container.contract_ref::<StakingPool>(env)?;
        let metrics = pool.get_pool_metrics();

        println!("Total assets: {}", metrics.total_assets);
        println!("Total shares: {}", metrics.total_shares);
        println!("Exchange rate (WAD): {}", metrics.exchange_rate);
        println!("Interest received: {}", metrics.total_interest_received);
        println!("Appreciation received: {}", metrics.total_appreciation_received);
        Ok(())
    }
}

impl ScenarioMetadata for PoolMetricsScenario {
    const NAME: &'static str = "pool-metrics";
    const DESCRIPTION: &'static str = "Prints the staking pool metrics";
}

/// Quotes a purchase at the ledger's current economics
pub struct MortgageQuoteScenario;

impl Scenario for MortgageQuoteScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![CommandArg::new("price", "Property price in settlement units", NamedCLType::U256).required()]
    }

    fn run(&self, env: &HostEnv, container: &DeployedContractsContainer, args: Args) -> Result<(), Error> {
        let price = args.get_single::<U256>("price")?;
        let ledger = container.contract_ref::<MortgageLedger>(env)?;
        let quote = ledger.quote_purchase(price);

        println!("Down payment: {}", quote.down_payment);
        println!("Platform fee: {}", quote.platform_fee);
        println!("Due at purchase: {}", quote.total_due);
        println!("Loan amount: {}", quote.loan_amount);
        println!("Monthly payment: {}", quote.monthly_payment);
        println!("Total of payments: {}", quote.total_payments);
        println!("Total interest: {}", quote.total_interest);
        Ok(())
    }
}

impl ScenarioMetadata for MortgageQuoteScenario {
    const NAME: &'static str = "mortgage-quote";
    const DESCRIPTION: &'static str = "Quotes down payment, fee and installments for a property price";
}

pub fn main() {
    OdraCli::new()
        .about("CLI tool for the property lending protocol")
        .deploy(ProtocolDeployScript)
        .contract::<MockUsdt>()
        .contract::<StakingPool>()
        .contract::<MortgageLedger>()
        .scenario(PoolMetricsScenario)
        .scenario(MortgageQuoteScenario)
        .build()
        .run();
}
