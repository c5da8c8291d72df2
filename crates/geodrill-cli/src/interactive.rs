use anyhow::Result;
use dialoguer::{Input, Select};
use geodrill_core::models::Snapshot;
use geodrill_geo::format_count;

/// Next step picked in an explore session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// A row of the breakdown table
    Row(String),
    /// A geometry label typed as if clicked on the map
    MapLabel(String),
    Reset,
    Quit,
}

/// Menu entries below the table rows
const RESET_ITEM: &str = "↺ National overview";
const MAP_ITEM: &str = "⌖ Click a map label";
const QUIT_ITEM: &str = "✗ Quit";

/// Prompt for the next drill-down step; Esc quits
pub fn choose_next(snapshot: &Snapshot) -> Result<Choice> {
    let selected_district = snapshot.view.selected_district();
    let mut items: Vec<String> = snapshot
        .table_data
        .iter()
        .map(|region| {
            let marker = if Some(region.name.as_str()) == selected_district { "● " } else { "" };
            format!("{}{} ({})", marker, region.name, format_count(region.value))
        })
        .collect();
    let rows = items.len();
    items.extend([RESET_ITEM, MAP_ITEM, QUIT_ITEM].map(String::from));

    let picked = Select::new()
        .with_prompt(snapshot.table_title())
        .items(&items)
        .default(0)
        .interact_opt()?;

    let choice = match picked {
        None => Choice::Quit,
        Some(i) if i < rows => Choice::Row(snapshot.table_data[i].name.clone()),
        Some(i) if i == rows => Choice::Reset,
        Some(i) if i == rows + 1 => {
            let label: String = Input::new().with_prompt("Map label").interact_text()?;
            Choice::MapLabel(label)
        }
        Some(_) => Choice::Quit,
    };

    Ok(choice)
}
