//! Interactive numbered menu
//!
//! Reads options from any `BufRead` and writes reports to any `Write`, so a
//! whole session can be scripted in tests. End of input exits the menu.

use crate::app::context::CarparkContext;
use crate::app::services::query;
use crate::cli::report;
use crate::constants::BASEMENT_CARPARK_TYPE;
use crate::error::CarparkError;
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const INVALID_INPUT: &str = "Invalid input! Please enter again!";

/// Menu entries in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Exit,
    CatalogTotal,
    Basements,
    LoadSnapshot,
    SnapshotTotal,
    Full,
    Available,
    AvailableWithAddresses,
    Location,
    MostLots,
    Export,
}

impl MenuOption {
    pub const ALL: [MenuOption; 11] = [
        MenuOption::CatalogTotal,
        MenuOption::Basements,
        MenuOption::LoadSnapshot,
        MenuOption::SnapshotTotal,
        MenuOption::Full,
        MenuOption::Available,
        MenuOption::AvailableWithAddresses,
        MenuOption::Location,
        MenuOption::MostLots,
        MenuOption::Export,
        MenuOption::Exit,
    ];

    pub fn number(&self) -> u32 {
        match self {
            MenuOption::Exit => 0,
            MenuOption::CatalogTotal => 1,
            MenuOption::Basements => 2,
            MenuOption::LoadSnapshot => 3,
            MenuOption::SnapshotTotal => 4,
            MenuOption::Full => 5,
            MenuOption::Available => 6,
            MenuOption::AvailableWithAddresses => 7,
            MenuOption::Location => 8,
            MenuOption::MostLots => 9,
            MenuOption::Export => 10,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MenuOption::Exit => "Exit",
            MenuOption::CatalogTotal => "Display Total Number of Carparks in the Metadata File",
            MenuOption::Basements => "Display All Basement Carparks in the Metadata File",
            MenuOption::LoadSnapshot => "Read Carpark Availability Data File",
            MenuOption::SnapshotTotal => "Print Total Number of Carparks in the File Read in [3]",
            MenuOption::Full => "Display Carparks Without Available Lots",
            MenuOption::Available => "Display Carparks With At Least x% Available Lots",
            MenuOption::AvailableWithAddresses => {
                "Display Addresses of Carparks With At Least x% Available Lots"
            }
            MenuOption::Location => "Display All Carparks at Given Location",
            MenuOption::MostLots => "Display Carpark with the Most Parking Lots",
            MenuOption::Export => {
                "Create an Output File with Sorted Carpark Availability with Addresses"
            }
        }
    }

    /// Options after [3] report on the loaded snapshot
    pub fn requires_snapshot(&self) -> bool {
        self.number() > MenuOption::LoadSnapshot.number()
    }
}

impl TryFrom<u32> for MenuOption {
    type Error = u32;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        MenuOption::ALL
            .into_iter()
            .find(|option| option.number() == value)
            .ok_or(value)
    }
}

/// Menu session over an input and an output stream
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the menu, returning the output stream
    pub fn into_output(self) -> W {
        self.output
    }

    /// Show the menu and run options until Exit or end of input
    pub fn run(&mut self, context: &mut CarparkContext) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(option) = self.prompt_option()? else {
                debug!("Menu input closed");
                return Ok(());
            };
            writeln!(self.output)?;

            if option == MenuOption::Exit {
                return Ok(());
            }

            if option.requires_snapshot() && !context.has_snapshot() {
                writeln!(self.output, "Please run option 3 first!")?;
                continue;
            }

            self.dispatch(option, context)?;
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "MENU")?;
        writeln!(self.output, "====")?;
        for option in MenuOption::ALL {
            let label = format!("[{}]", option.number());
            writeln!(self.output, "{:<4} {}", label, option.title())?;
        }
        Ok(())
    }

    fn dispatch(&mut self, option: MenuOption, context: &mut CarparkContext) -> Result<()> {
        let heading = format!("Option {}: {}", option.number(), option.title());
        report::write_heading(&mut self.output, &heading)?;

        match option {
            MenuOption::Exit => {}
            MenuOption::CatalogTotal => {
                let catalog = context.catalog()?;
                let file_name = context.config().catalog_file.clone();
                report::write_catalog_total(&mut self.output, &catalog, &file_name)?;
            }
            MenuOption::Basements => {
                let catalog = context.catalog()?;
                let basements = catalog.records_of_type(BASEMENT_CARPARK_TYPE);
                report::write_basements(&mut self.output, &basements)?;
            }
            MenuOption::LoadSnapshot => {
                let Some(name) = self.prompt_line("Enter the file name: ")? else {
                    return Ok(());
                };
                let name = name.trim();

                // Load failures are reported and the session carries on
                if let Err(e) = context.catalog() {
                    let catalog_file = context.config().catalog_file.clone();
                    return self.report_load_failure(&catalog_file, &e);
                }
                match context.load_snapshot_file(name) {
                    Ok(snapshot) => report::write_snapshot_loaded(&mut self.output, snapshot)?,
                    Err(e) => self.report_load_failure(name, &e)?,
                }
            }
            MenuOption::SnapshotTotal => {
                report::write_snapshot_total(&mut self.output, context.snapshot()?)?;
            }
            MenuOption::Full => {
                let full = query::records_with_zero_availability(&context.snapshot()?.records);
                report::write_full(&mut self.output, &full)?;
            }
            MenuOption::Available | MenuOption::AvailableWithAddresses => {
                let Some(threshold) = self.prompt_percentage()? else {
                    return Ok(());
                };
                let records =
                    query::filter_by_min_percentage(&context.snapshot()?.records, threshold);
                let with_address = option == MenuOption::AvailableWithAddresses;
                report::write_availability(&mut self.output, &records, with_address)?;
            }
            MenuOption::Location => {
                let Some(location) =
                    self.prompt_line("Please enter the location to search for: ")?
                else {
                    return Ok(());
                };
                let location = location.trim();
                let records = query::filter_by_address(&context.snapshot()?.records, location);
                report::write_location(&mut self.output, location, &records)?;
            }
            MenuOption::MostLots => {
                let record = query::max_total_lots(&context.snapshot()?.records)?;
                report::write_most_lots(&mut self.output, record)?;
            }
            MenuOption::Export => {
                let summary = context.export()?;
                report::write_export_summary(&mut self.output, &summary)?;
            }
        }
        Ok(())
    }

    fn report_load_failure(&mut self, file_name: &str, error: &CarparkError) -> Result<()> {
        warn!("Loading {} failed: {}", file_name, error);
        writeln!(self.output, "Could not read file: {}", file_name)?;
        if !matches!(error, CarparkError::SourceUnavailable { .. }) {
            writeln!(self.output, "{}", error)?;
        }
        Ok(())
    }

    /// Keep asking until a known option number is entered
    fn prompt_option(&mut self) -> Result<Option<MenuOption>> {
        loop {
            let Some(line) = self.prompt_line("Enter your option: ")? else {
                return Ok(None);
            };
            match line.trim().parse::<u32>().map(MenuOption::try_from) {
                Ok(Ok(option)) => return Ok(Some(option)),
                _ => writeln!(self.output, "{}", INVALID_INPUT)?,
            }
        }
    }

    /// Keep asking until an integer in 0-100 is entered
    fn prompt_percentage(&mut self) -> Result<Option<f64>> {
        loop {
            let Some(line) = self.prompt_line("Enter the percentage required: ")? else {
                return Ok(None);
            };
            match line.trim().parse::<u8>() {
                Ok(value) if value <= 100 => return Ok(Some(f64::from(value))),
                _ => writeln!(self.output, "{}", INVALID_INPUT)?,
            }
        }
    }

    /// Print `prompt` and read one line; `None` at end of input
    fn prompt_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
