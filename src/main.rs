use clap::Parser;
use ctrlgraph::{
    cli::{quantize_selector, render_lane, step_quantize, Args, Command, RenderRequest},
    config::AppConfig,
    logging,
    quantize::{decompose, PopupAction, QuantizeSelector},
};
use dialoguer::{theme::ColorfulTheme, Select};
use std::cell::Cell;
use std::rc::Rc;

fn main() {
    initialize_logging();
    let args = Args::parse();

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with_error(&format!("Error loading configuration: {}", e)),
    };

    match args.command {
        Command::Quantize {
            value,
            wheel,
            interactive,
        } => {
            let value = step_quantize(value, wheel);
            let value = if interactive {
                run_quantize_popup(value)
            } else {
                value
            };
            print_quantize(value);
        }
        Command::Render {
            lane,
            points,
            clicks,
            axis_clicks,
            position,
            scroll_left,
        } => {
            let request = RenderRequest {
                lane,
                points,
                clicks,
                axis_clicks,
                position,
                scroll_left,
            };
            match render_lane(&request, &config) {
                Ok(output) => print!("{}", output),
                Err(e) => exit_with_error(&format!("Error rendering {} lane: {}", lane, e)),
            }
        }
    }
}

fn initialize_logging() {
    match logging::init_logger() {
        Ok(()) => log::info!("Application starting"),
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }
}

fn exit_with_error(error_msg: &str) -> ! {
    log::error!("{}", error_msg);
    eprintln!("{}", error_msg);
    std::process::exit(1);
}

fn print_quantize(value: f64) {
    let quantize = decompose(value);
    let (selector, _) = quantize_selector(value);
    println!("{}", selector.view());
    println!(
        "value {} = denominator {}{}{}",
        value,
        quantize.denominator,
        if quantize.dotted { ", dotted" } else { "" },
        if quantize.triplet { ", triplet" } else { "" },
    );
}

/// Loops over the popup until the user picks "done". Every selection is fed
/// back into the selector as its new value.
fn run_quantize_popup(value: f64) -> f64 {
    let (mut selector, selected) = quantize_selector(value);
    selector.toggle_popup();

    loop {
        let popup = selector.popup();
        let mut items: Vec<String> = popup
            .values
            .iter()
            .map(|&d| {
                let marker = if popup.is_selected(d) { "*" } else { " " };
                format!("{} {}", marker, d)
            })
            .collect();
        items.push(format!("[{}] dotted", if popup.dotted { "x" } else { " " }));
        items.push(format!("[{}] triplet", if popup.triplet { "x" } else { " " }));
        items.push("done".to_string());

        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(selector.view().to_string())
            .items(&items)
            .default(0)
            .interact_opt();

        let action = match choice {
            Ok(Some(index)) if index < popup.values.len() => {
                PopupAction::Value(popup.values[index])
            }
            Ok(Some(index)) if index == popup.values.len() => popup.toggle_dotted(),
            Ok(Some(index)) if index == popup.values.len() + 1 => popup.toggle_triplet(),
            Ok(_) => break,
            Err(e) => {
                log::error!("Quantize popup failed: {}", e);
                break;
            }
        };
        apply_selection(&mut selector, &selected, action);
    }

    selector.toggle_popup();
    selector.value()
}

fn apply_selection(selector: &mut QuantizeSelector, selected: &Rc<Cell<f64>>, action: PopupAction) {
    selector.apply(action);
    selector.set_value(selected.get());
}
