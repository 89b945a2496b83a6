//! Chain Greeks GUI
//!
//! Interactive plots of any record field (implied volatility, observed price,
//! or any Greek) across strikes, per expiration, with in-the-money and
//! out-of-the-money records drawn as separate series.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints, VLine};

use chain_greeks::prelude::*;

struct GreeksApp {
    // Ticker fetch
    ticker_input: String,
    price_mode: PriceMode,
    rate: f64,
    fetch_status: String,
    is_fetching: bool,

    // UI state
    selected_field: String,
    selected_expiry: usize,
    show_calls: bool,
    show_puts: bool,

    // Data
    chains: Option<ChainSet>,
}

impl Default for GreeksApp {
    fn default() -> Self {
        Self {
            ticker_input: "SPY".to_string(),
            price_mode: PriceMode::Mid,
            rate: 0.0,
            fetch_status: String::new(),
            is_fetching: false,
            selected_field: "implied_volatility".to_string(),
            selected_expiry: 0,
            show_calls: true,
            show_puts: true,
            chains: None,
        }
    }
}

impl GreeksApp {
    fn fetch_chains(&mut self) {
        let ticker = self.ticker_input.trim().to_uppercase();
        if ticker.is_empty() {
            self.fetch_status = "Enter a ticker symbol".to_string();
            return;
        }

        self.fetch_status = format!("Fetching {}...", ticker);
        self.is_fetching = true;

        let result = CachedFetcher::new(CacheConfig::default(), self.price_mode, self.rate)
            .and_then(|fetcher| fetcher.get_chains(&ticker));

        match result {
            Ok(chains) => {
                self.fetch_status = format!(
                    "{}: {} records, {} expirations",
                    ticker,
                    chains.total_records(),
                    chains.expirations().len()
                );
                self.ticker_input = ticker;
                self.selected_expiry = 0;
                self.chains = Some(chains);
            }
            Err(e) => {
                self.fetch_status = format!("Error: {e}");
            }
        }
        self.is_fetching = false;
    }

    /// Strike/value points for one moneyness side of a record list.
    fn series(records: &[OptionRecord], field: &str, itm: bool) -> PlotPoints {
        let points: Vec<[f64; 2]> = records
            .iter()
            .filter(|r| r.itm == itm)
            .filter_map(|r| r.field(field).map(|v| [r.strike, v]))
            .collect();
        PlotPoints::from(points)
    }
}

impl eframe::App for GreeksApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Chain Greeks");
            ui.separator();

            ui.heading("Fetch Data");
            ui.horizontal(|ui| {
                ui.label("Ticker:");
                ui.text_edit_singleline(&mut self.ticker_input);
            });
            ui.horizontal(|ui| {
                ui.label("Price:");
                ui.radio_value(&mut self.price_mode, PriceMode::Mid, "mid");
                ui.radio_value(&mut self.price_mode, PriceMode::Last, "last");
            });
            ui.horizontal(|ui| {
                ui.label("Rate:");
                ui.add(
                    egui::DragValue::new(&mut self.rate)
                        .speed(0.001)
                        .clamp_range(-0.05..=0.20),
                );
            });
            if ui.button("Fetch").clicked() && !self.is_fetching {
                self.fetch_chains();
            }
            if !self.fetch_status.is_empty() {
                ui.label(&self.fetch_status);
            }

            if let Some(ref chains) = self.chains {
                ui.separator();
                ui.label(format!("Symbol: {}", chains.underlying));
                ui.label(format!("Spot: ${:.2}", chains.spot));
                ui.label(format!(
                    "Quoted: {} {}",
                    chains.quote_date,
                    chains.quote_time.format("%H:%M")
                ));
            }

            ui.separator();
            ui.heading("Display");
            ui.checkbox(&mut self.show_calls, "Calls");
            ui.checkbox(&mut self.show_puts, "Puts");

            ui.separator();
            ui.heading("Field");
            for field in RECORD_FIELDS {
                if ui
                    .selectable_label(self.selected_field == *field, *field)
                    .clicked()
                {
                    self.selected_field = field.to_string();
                }
            }

            if let Some(ref chains) = self.chains {
                ui.separator();
                ui.heading("Expiration");
                for (i, expiry) in chains.expirations().iter().enumerate() {
                    if ui
                        .selectable_label(self.selected_expiry == i, expiry.to_string())
                        .clicked()
                    {
                        self.selected_expiry = i;
                    }
                }
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(ref chains) = self.chains else {
                ui.heading("Fetch a ticker to plot its Greeks");
                return;
            };

            let expirations = chains.expirations();
            let Some(&expiry) = expirations.get(self.selected_expiry) else {
                return;
            };

            ui.heading(format!("{} {} by strike", self.selected_field, expiry));

            Plot::new("greeks_plot")
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    plot_ui.vline(VLine::new(chains.spot).name("spot"));

                    if self.show_calls {
                        if let Some(calls) = chains.records(expiry, OptionKind::Call) {
                            plot_ui.line(
                                Line::new(Self::series(calls, &self.selected_field, true))
                                    .color(egui::Color32::BLACK)
                                    .name("ITM calls"),
                            );
                            plot_ui.line(
                                Line::new(Self::series(calls, &self.selected_field, false))
                                    .color(egui::Color32::YELLOW)
                                    .name("OTM calls"),
                            );
                        }
                    }
                    if self.show_puts {
                        if let Some(puts) = chains.records(expiry, OptionKind::Put) {
                            plot_ui.line(
                                Line::new(Self::series(puts, &self.selected_field, true))
                                    .color(egui::Color32::GREEN)
                                    .name("ITM puts"),
                            );
                            plot_ui.line(
                                Line::new(Self::series(puts, &self.selected_field, false))
                                    .color(egui::Color32::RED)
                                    .name("OTM puts"),
                            );
                        }
                    }
                });
        });
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Chain Greeks",
        options,
        Box::new(|_cc| Box::new(GreeksApp::default())),
    )
}
