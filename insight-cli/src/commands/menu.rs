//! Interactive text menu.
//!
//! Each menu is a loop: print the pending notification and the intro, list
//! numbered options, run the chosen action. Actions return a [`Step`] with the
//! notification for the next round. Errors from an action become the
//! notification; the session keeps going.

use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use insight_catalog::{CardFilter, CardType, Comparator, DeckRecord, NumericCondition, Region};
use insight_import::SilentProgress;
use insight_lib::{AppContext, DeckEditor, display, parse_quantity};

use crate::CliError;

use super::decks::{deck_table, deck_view};
use super::prompt::{Step, confirm, parse_selection, read_line, select};
use super::{open_context, resolve_deck};

/// Run one action and turn its error into a notification.
fn run_action(action: impl FnOnce() -> Result<Step, CliError>) -> Step {
    match action() {
        Ok(step) => step,
        Err(e) => {
            log::debug!("Menu action failed: {:?}", e);
            Step::Stay(e.to_string())
        }
    }
}

/// Prompt for a line; `None` means the user closed input.
fn ask(prompt: &str) -> Result<Option<String>, CliError> {
    read_line(&format!("{}\n", prompt))
}

fn pause() -> Result<(), CliError> {
    read_line("Press Enter to continue\n")?;
    Ok(())
}

// ── Main Menu ───────────────────────────────────────────────────────────────

/// Entry point when `insight` runs without a subcommand.
pub(crate) fn run_menu(db: Option<PathBuf>) -> Result<(), CliError> {
    let ctx = open_context(db)?;
    println!(
        "{}",
        "Welcome to Insight Apparatus, the Sanity's End Deck Builder!"
            .if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    let options = [
        "View your decks",
        "List the cards",
        "Create a deck",
        "Import deck (from file in untap deck format)",
        "Exit",
    ];
    let mut notification = None;
    loop {
        let Some(choice) = select("What would you like to do?", &options, &mut notification)? else {
            break;
        };
        let step = match choice {
            0 => run_action(|| decks_menu(&ctx)),
            1 => run_action(|| cards_menu(&ctx)),
            2 => run_action(|| create_deck(&ctx)),
            3 => run_action(|| import_deck(&ctx)),
            _ => break,
        };
        match step {
            Step::Stay(note) | Step::Back(note) => notification = Some(note),
        }
    }
    println!("Exiting program");
    Ok(())
}

fn create_deck(ctx: &AppContext) -> Result<Step, CliError> {
    let Some(name) = ask("Enter the name of the deck:")? else {
        return Ok(Step::Stay("Cancelled".to_string()));
    };
    if name.is_empty() {
        return Ok(Step::Stay("A deck needs a name".to_string()));
    }
    run_editor(ctx, DeckEditor::new(name))?;
    Ok(Step::Stay("Returning to previous menu".to_string()))
}

fn import_deck(ctx: &AppContext) -> Result<Step, CliError> {
    let Some(file) = ask("Enter the name of the file to import:")? else {
        return Ok(Step::Stay("Cancelled".to_string()));
    };
    let path = PathBuf::from(&file);
    let outcome = insight_import::import_deck_file(&ctx.conn, &path, Some(&SilentProgress))
        .map_err(|e| CliError::import(e.to_string()))?;
    if let Some(view) = display::render_partial_view(&outcome.deck) {
        println!("{}", view);
    }
    for name in &outcome.skipped {
        println!("Card '{}' not found, skipping...", name);
    }
    Ok(Step::Stay(format!(
        "Deck '{}' imported successfully!",
        outcome.record.name
    )))
}

// ── Deck Menus ──────────────────────────────────────────────────────────────

fn decks_menu(ctx: &AppContext) -> Result<Step, CliError> {
    let options = [
        "View a deck",
        "Edit a deck",
        "Delete a deck",
        "Create a new deck",
        "Return to the Main Menu",
    ];
    let mut notification = None;
    loop {
        println!("{}", deck_table(&ctx.conn)?);
        let Some(choice) = select("Would you like to:", &options, &mut notification)? else {
            break;
        };
        let step = match choice {
            0 => run_action(|| view_deck(ctx)),
            1 => run_action(|| edit_deck(ctx)),
            2 => run_action(|| delete_deck(ctx)),
            3 => run_action(|| create_deck(ctx)),
            _ => break,
        };
        match step {
            Step::Stay(note) => notification = Some(note),
            Step::Back(note) => return Ok(Step::Stay(note)),
        }
    }
    Ok(Step::Back("Returning to main menu".to_string()))
}

/// Ask for a deck id or name and resolve it.
fn choose_deck(ctx: &AppContext, prompt: &str) -> Result<Option<DeckRecord>, CliError> {
    let Some(key) = ask(prompt)? else {
        return Ok(None);
    };
    resolve_deck(&ctx.conn, &key).map(Some)
}

fn view_deck(ctx: &AppContext) -> Result<Step, CliError> {
    let Some(record) = choose_deck(ctx, "Which deck do you want to view?")? else {
        return Ok(Step::Stay("Cancelled".to_string()));
    };
    single_deck_menu(ctx, record)
}

fn edit_deck(ctx: &AppContext) -> Result<Step, CliError> {
    let Some(record) = choose_deck(ctx, "Which deck do you want to edit?")? else {
        return Ok(Step::Stay("Cancelled".to_string()));
    };
    edit_record(ctx, &record)
}

fn edit_record(ctx: &AppContext, record: &DeckRecord) -> Result<Step, CliError> {
    let editor = DeckEditor::open(&ctx.conn, record.id)
        .map_err(|e| CliError::database(e.to_string()))?
        .ok_or_else(|| CliError::not_found(format!("Deck {} no longer exists", record.id)))?;
    run_editor(ctx, editor)?;
    Ok(Step::Stay("Returning to previous menu".to_string()))
}

fn delete_deck(ctx: &AppContext) -> Result<Step, CliError> {
    let Some(record) = choose_deck(ctx, "Which deck do you wish to delete?")? else {
        return Ok(Step::Stay("Cancelled".to_string()));
    };
    // The deck list stays open after a delete from it.
    Ok(match delete_record(ctx, &record)? {
        Step::Back(note) => Step::Stay(note),
        step => step,
    })
}

fn delete_record(ctx: &AppContext, record: &DeckRecord) -> Result<Step, CliError> {
    if !confirm(&format!("Delete '{}'?", record.name))? {
        return Ok(Step::Stay("Nothing deleted".to_string()));
    }
    insight_db::delete_deck(&ctx.conn, record.id)?;
    Ok(Step::Back(format!("Deck with id {} deleted", record.id)))
}

fn single_deck_menu(ctx: &AppContext, record: DeckRecord) -> Result<Step, CliError> {
    let options = [
        "Register Win",
        "Register Loss",
        "Edit deck",
        "Delete deck",
        "Return to previous menu",
    ];
    let mut notification = None;
    loop {
        println!("{}", deck_view(&ctx.conn, &record)?);
        pause()?;
        let Some(choice) = select(
            "What do you want to do with this Deck?",
            &options,
            &mut notification,
        )?
        else {
            break;
        };
        let step = match choice {
            0 => run_action(|| register(ctx, &record, true)),
            1 => run_action(|| register(ctx, &record, false)),
            2 => run_action(|| edit_record(ctx, &record)),
            3 => run_action(|| delete_record(ctx, &record)),
            _ => break,
        };
        match step {
            Step::Stay(note) => notification = Some(note),
            Step::Back(note) => return Ok(Step::Stay(note)),
        }
    }
    Ok(Step::Stay("Returning to previous menu".to_string()))
}

fn register(ctx: &AppContext, record: &DeckRecord, won: bool) -> Result<Step, CliError> {
    insight_db::register_outcome(&ctx.conn, record.id, won)?;
    Ok(Step::Stay(if won {
        "Registered a Win for the Deck!".to_string()
    } else {
        "Registered a Loss for the Deck".to_string()
    }))
}

// ── Deck Editor ─────────────────────────────────────────────────────────────

/// Run an editing session until the user closes it.
pub(crate) fn run_editor(ctx: &AppContext, mut editor: DeckEditor) -> Result<(), CliError> {
    let options = [
        "Add a card",
        "Remove a card",
        "List cards",
        "Save deck",
        "Print deck (to file, in untap format)",
        "Close (without saving)",
    ];
    let mut notification = None;
    loop {
        if let Some(view) = editor.partial_view() {
            println!();
            println!("{}", view);
            println!();
        }
        let Some(choice) = select("What do you want to do?", &options, &mut notification)? else {
            break;
        };
        let step = match choice {
            0 => run_action(|| add_card(ctx, &mut editor)),
            1 => run_action(|| remove_card(&mut editor)),
            2 => run_action(|| cards_menu(ctx)),
            3 => run_action(|| {
                editor
                    .save(&ctx.conn)
                    .map(Step::Stay)
                    .map_err(|e| CliError::database(e.to_string()))
            }),
            4 => run_action(|| export_deck(&editor)),
            _ => break,
        };
        match step {
            Step::Stay(note) | Step::Back(note) => notification = Some(note),
        }
    }
    println!("Closing without saving...");
    Ok(())
}

fn ask_quantity(prompt: &str) -> Result<Option<u32>, CliError> {
    let Some(input) = ask(prompt)? else {
        return Ok(None);
    };
    parse_quantity(&input)
        .map(Some)
        .map_err(|e| CliError::other(e.to_string()))
}

fn add_card(ctx: &AppContext, editor: &mut DeckEditor) -> Result<Step, CliError> {
    let Some(name) = ask("Enter the name of the card:")? else {
        return Ok(Step::Stay("Cancelled".to_string()));
    };
    if insight_db::find_card_by_name(&ctx.conn, &name)?.is_none() {
        return Ok(Step::Stay(format!("Card '{}' not found", name)));
    }
    let prompt = format!("How many copies of {} do you want to add?", name);
    let Some(quantity) = ask_quantity(&prompt)? else {
        return Ok(Step::Stay("Cancelled".to_string()));
    };
    editor
        .add_by_name(&ctx.conn, &name, quantity)
        .map(Step::Stay)
        .map_err(|e| CliError::database(e.to_string()))
}

fn remove_card(editor: &mut DeckEditor) -> Result<Step, CliError> {
    let Some(name) = ask("Enter the name of the card:")? else {
        return Ok(Step::Stay("Cancelled".to_string()));
    };
    let Some(line) = editor.deck().line(&name) else {
        return Ok(Step::Stay(format!("Card '{}' not found in your deck.", name)));
    };
    let card_name = line.card.name.clone();
    let Some(quantity) =
        ask_quantity(&format!("How many copies of {} do you want to remove?", card_name))?
    else {
        return Ok(Step::Stay("Cancelled".to_string()));
    };
    Ok(Step::Stay(editor.remove_by_name(&name, quantity)))
}

fn export_deck(editor: &DeckEditor) -> Result<Step, CliError> {
    let Some(file) = ask("Enter the name for the file to save to:")? else {
        return Ok(Step::Stay("Cancelled".to_string()));
    };
    if file.is_empty() {
        return Ok(Step::Stay("No file name given".to_string()));
    }
    editor
        .export(&PathBuf::from(file))
        .map(Step::Stay)
        .map_err(|e| CliError::import(e.to_string()))
}

// ── Card Catalog ────────────────────────────────────────────────────────────

fn cards_menu(ctx: &AppContext) -> Result<Step, CliError> {
    let options = ["List all cards", "Filter the options", "Return"];
    let mut notification = None;
    loop {
        let Some(choice) = select("Choose an option:", &options, &mut notification)? else {
            break;
        };
        let step = match choice {
            0 => run_action(|| show_cards(ctx, &CardFilter::new())),
            1 => run_action(|| filter_menu(ctx)),
            _ => break,
        };
        match step {
            Step::Stay(note) | Step::Back(note) => notification = Some(note),
        }
    }
    Ok(Step::Stay("Returning to previous menu".to_string()))
}

fn show_cards(ctx: &AppContext, filter: &CardFilter) -> Result<Step, CliError> {
    let cards = insight_db::list_cards(&ctx.conn, filter)?;
    if cards.is_empty() {
        return Ok(Step::Stay("No cards match these filters".to_string()));
    }
    println!("{}", display::render_card_table(&cards));
    pause()?;
    Ok(Step::Stay(format!("Found {} cards", cards.len())))
}

fn conditions_label(conditions: &[NumericCondition]) -> String {
    if conditions.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = conditions.iter().map(|c| c.to_string()).collect();
    format!(" ({})", parts.join(", "))
}

fn list_label<T: std::fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = items.iter().map(|i| i.to_string()).collect();
    format!(" ({})", parts.join(","))
}

fn text_label(text: Option<&str>) -> String {
    text.map(|t| format!(" ({})", t)).unwrap_or_default()
}

fn filter_menu(ctx: &AppContext) -> Result<Step, CliError> {
    let mut filter = CardFilter::new();
    let mut notification = None;
    loop {
        let options = [
            format!("name{}", text_label(filter.name_pattern())),
            format!("card type{}", list_label(&filter.types)),
            format!("region{}", list_label(&filter.regions)),
            format!("effect{}", text_label(filter.effect_pattern())),
            format!("power{}", conditions_label(&filter.power)),
            format!("madness{}", conditions_label(&filter.madness)),
            "Search with these filters".to_string(),
            "Return".to_string(),
        ];
        let Some(choice) = select("What do you want to filter by?", &options, &mut notification)?
        else {
            break;
        };
        let step = match choice {
            0 => run_action(|| set_text_filter(&mut filter.name, "name")),
            1 => run_action(|| add_choice(&mut filter, CardType::all(), "type")),
            2 => run_action(|| add_choice(&mut filter, Region::all(), "region")),
            3 => run_action(|| set_text_filter(&mut filter.effect, "effect")),
            4 => run_action(|| add_condition(&mut filter.power, "power")),
            5 => run_action(|| add_condition(&mut filter.madness, "madness")),
            6 => run_action(|| show_cards(ctx, &filter)),
            _ => break,
        };
        match step {
            Step::Stay(note) | Step::Back(note) => notification = Some(note),
        }
    }
    Ok(Step::Stay("Returning to previous menu".to_string()))
}

fn set_text_filter(slot: &mut Option<String>, field: &str) -> Result<Step, CliError> {
    let Some(text) = ask(&format!("Enter the {} or part of the {} of the card:", field, field))?
    else {
        return Ok(Step::Stay("Cancelled".to_string()));
    };
    if text.is_empty() {
        *slot = None;
        return Ok(Step::Stay(format!("Cleared {} filter", field)));
    }
    *slot = Some(text);
    Ok(Step::Stay(format!("Added {} filter", field)))
}

/// A choice list the filter menu can add to.
trait FilterChoice: Copy + std::fmt::Display + PartialEq {
    fn selected(filter: &CardFilter) -> &[Self];
    fn add_to(self, filter: &mut CardFilter) -> bool;
}

impl FilterChoice for CardType {
    fn selected(filter: &CardFilter) -> &[Self] {
        &filter.types
    }

    fn add_to(self, filter: &mut CardFilter) -> bool {
        filter.add_type(self)
    }
}

impl FilterChoice for Region {
    fn selected(filter: &CardFilter) -> &[Self] {
        &filter.regions
    }

    fn add_to(self, filter: &mut CardFilter) -> bool {
        filter.add_region(self)
    }
}

fn add_choice<T: FilterChoice>(
    filter: &mut CardFilter,
    choices: &[T],
    field: &str,
) -> Result<Step, CliError> {
    println!("Choose a {} to search for:", field);
    println!();
    for (i, choice) in choices.iter().enumerate() {
        println!("{}. {}", i + 1, choice);
    }
    let Some(input) = read_line("")? else {
        return Ok(Step::Stay("Cancelled".to_string()));
    };
    let labels: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
    let Some(index) = parse_selection(&input, &labels) else {
        return Ok(Step::Stay("Couldn't find option, try again".to_string()));
    };
    let chosen = choices[index];

    let mut preview: Vec<String> = T::selected(filter).iter().map(|c| c.to_string()).collect();
    if !T::selected(filter).contains(&chosen) {
        preview.push(chosen.to_string());
    }
    let question = format!(
        "Do you confirm adding '{}'? The new list of {} will be: {}",
        chosen,
        field,
        preview.join(", ")
    );
    if !confirm(&question)? {
        return Ok(Step::Stay("Nothing added to the filter".to_string()));
    }
    if chosen.add_to(filter) {
        Ok(Step::Stay(format!("Added {} to the list of {}", chosen, field)))
    } else {
        Ok(Step::Stay(format!("{} is already in the list of {}", chosen, field)))
    }
}

fn add_condition(conditions: &mut Vec<NumericCondition>, field: &str) -> Result<Step, CliError> {
    println!("Do you want to filter the cards that have a {}", field);
    println!();
    for (i, comparator) in Comparator::all().iter().enumerate() {
        println!("{}. {}", i + 1, comparator.description());
    }
    println!();
    println!("a certain value?");
    println!("press {} to cancel and go back", Comparator::all().len() + 1);

    let Some(input) = read_line("")? else {
        return Ok(Step::Stay("Cancelled".to_string()));
    };
    let labels: Vec<&str> = Comparator::all().iter().map(|c| c.description()).collect();
    let Some(index) = parse_selection(&input, &labels) else {
        return Ok(Step::Stay("No filter added".to_string()));
    };
    let comparator = Comparator::all()[index];

    let Some(value) = ask(&format!(
        "Search for cards with {} {}",
        field,
        comparator.description()
    ))?
    else {
        return Ok(Step::Stay("Cancelled".to_string()));
    };
    let value: i64 = value
        .parse()
        .map_err(|_| CliError::other(format!("'{}' is not a number", value)))?;

    let condition = NumericCondition::new(comparator, value);
    conditions.push(condition);
    Ok(Step::Stay(format!(
        "The filter condition {} {} {} was added",
        field,
        comparator.symbol(),
        value
    )))
}
