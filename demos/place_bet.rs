//! Walk one market card through the bet flow and place a simulated bet.
//!
//! ```bash
//! RUST_LOG=zest_markets=debug cargo run --example place_bet
//! ```
//!
//! Markets are read from Kalshi's demo API; without network access the demo
//! falls back to a local market.

use tracing_subscriber::EnvFilter;
use zest_markets::bet::{BetFlowController, BetStep};
use zest_markets::client::RestClient;
use zest_markets::config::{Environment, Locale};
use zest_markets::portfolio::Portfolio;
use zest_markets::types::{Category, Market, Outcome};
use zest_markets::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::new().with_environment(Environment::Demo);
    let rest = RestClient::new(&config)?;

    let market = match rest.get_open_markets().await {
        Ok(markets) if !markets.is_empty() => markets[0].clone(),
        Ok(_) => fallback_market(),
        Err(e) => {
            println!("Could not load markets ({}), using a local one", e);
            fallback_market()
        }
    };

    println!("{} [{}]", market.title, market.category.label());
    for outcome in [Outcome::Yes, Outcome::No] {
        println!(
            "  {:<12} {}%",
            market.label_for(outcome),
            market.percent_for(outcome)
        );
    }

    let mut portfolio = Portfolio::new("demo-user");
    portfolio.deposit("50,00")?;
    println!("Balance: {}", portfolio.balance_display(config.locale()));

    let mut flow = BetFlowController::new();
    flow.expand(Outcome::Yes);
    flow.select(Outcome::No);
    for typed in ["7", "75", "75,", "75,5"] {
        let state = flow.set_amount(typed);
        if state.step() == BetStep::Confirm {
            if let Some(quote) = state.quote(market.price_for(Outcome::No)) {
                println!(
                    "  typed {:<6} -> payout R$ {} ({}%)",
                    typed,
                    quote.payout_display(),
                    quote.profit_percent_display()
                );
            }
        }
    }

    let Some(bet) = flow.confirm() else {
        println!("Nothing to confirm");
        return Ok(());
    };

    match portfolio.place_bet(&market, &bet) {
        Ok(receipt) => {
            flow.complete();
            println!("Placed: {:?}", receipt);
        }
        Err(e) if e.needs_deposit() => {
            println!("{} - topping up and retrying", e);
            portfolio.deposit(bet.amount_reais)?;
            let receipt = portfolio.place_bet(&market, &bet)?;
            flow.complete();
            println!("Placed: {:?}", receipt);
        }
        Err(e) => return Err(e.into()),
    }

    println!(
        "Balance: {}",
        portfolio.balance_display(Locale::PtBr)
    );
    println!("History:\n{}", portfolio.history_json()?);

    Ok(())
}

fn fallback_market() -> Market {
    Market::new("KXSELIC-25DEC", "Selic acima de 15% em dezembro?", 0.65, 0.37)
        .with_category(Category::Economia)
        .with_labels(Some("Acima de 15%".to_string()), None)
}
