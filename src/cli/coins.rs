use super::ui;
use crate::core::Coin;
use crate::core::asset::SUPPORTED_CURRENCIES;
use comfy_table::{Cell, Table};

/// Builds the catalogue table: one row per coin.
pub fn coins_table(coins: &[Coin]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Name")]);
    for coin in coins {
        table.add_row(vec![Cell::new(coin.code.as_str()), Cell::new(&coin.name)]);
    }
    table
}

pub fn run(coins: &[Coin]) {
    if coins.is_empty() {
        println!("No coins configured.");
        return;
    }

    println!("{}\n", ui::style_text("Supported coins", ui::StyleType::Title));
    println!("{}", coins_table(coins));
    println!(
        "\n{}",
        ui::style_text(
            &format!("Currencies: {}", SUPPORTED_CURRENCIES.join(", ")),
            ui::StyleType::Subtle
        )
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset::default_coins;

    #[test]
    fn test_coins_table_lists_every_coin() {
        let coins = default_coins();
        let rendered = coins_table(&coins).to_string();
        for coin in &coins {
            assert!(rendered.contains(coin.code.as_str()));
            assert!(rendered.contains(&coin.name));
        }
    }
}
