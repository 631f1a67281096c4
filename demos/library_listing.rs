use company_finder::controller::{ControlChange, ControlState};
use company_finder::records::{SortField, SortOrder};
use company_finder::runner::{Options, Runner};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(Options {
        controls: ControlState {
            sort: SortField::EmployeeCount,
            order: SortOrder::Descending,
            ..ControlState::default()
        },
        ..Options::default()
    })?;
    let mut controller = runner.start().await?;

    println!("Countries:");
    for opt in controller.view().country_options.iter() {
        println!("  {}", opt.label());
    }

    controller.apply_change(ControlChange::Sort(SortField::Name));
    if let Some(view) = controller.refresh() {
        println!("Companies: {}", view.results.len());
        for item in view.results.iter().take(10) {
            println!("  {item}");
        }
    }

    Ok(())
}
