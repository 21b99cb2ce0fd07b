//! Line commands for the interactive session.

use std::path::PathBuf;

use larder_core::form::{FormError, RecipesTab, RecordTab, RowKind};
use larder_core::record::{Field, Record};

use crate::error::{CommandError, CommandResult};
use crate::logging;
use crate::session::{Session, TabKind};

const HELP: &[&str] = &[
    "new                               start an empty document",
    "open PATH                         load a .json/.yaml file",
    "save | save-as PATH               write confirmed entries",
    "tab ingredients|recipes           switch the active tab",
    "list                              list entries of the active tab",
    "select N                          select entry N for editing",
    "show                              show the form of the selected entry",
    "set id|name|duration VALUE        edit a field of the selected entry",
    "confirm | cancel                  keep or discard the edits",
    "add NAME | remove                 add an entry / remove the selected one",
    "row add ingredient|product        add a row to the selected recipe",
    "row remove ingredient|product N   remove row N",
    "row set ingredient|product N ITEM AMOUNT",
    "options ingredient|product N      items row N can be switched to",
    "warnings                          scan for duplicate ids",
    "log [N]                           show the last N log messages",
    "help | quit",
];

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Open(PathBuf),
    Save,
    SaveAs(PathBuf),
    Tab(TabKind),
    List,
    Show,
    Select(usize),
    Set(Field, String),
    Confirm,
    Cancel,
    Add(String),
    Remove,
    RowAdd(RowKind),
    RowRemove(RowKind, usize),
    RowSet {
        kind: RowKind,
        row: usize,
        item: String,
        amount: String,
    },
    Options(RowKind, usize),
    Warnings,
    Log(usize),
    Help,
    Quit,
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(Vec<String>),
    Quit,
}

impl Reply {
    fn none() -> Self {
        Reply::Output(Vec::new())
    }

    fn line(text: impl Into<String>) -> Self {
        Reply::Output(vec![text.into()])
    }
}

/// Splits off the first whitespace-delimited word.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

fn parse_index(text: &str, usage: &'static str) -> CommandResult<usize> {
    text.trim().parse().map_err(|_| CommandError::Usage(usage))
}

impl Command {
    /// Parses one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> CommandResult<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = split_word(line);
        let command = match word.to_ascii_lowercase().as_str() {
            "new" => Command::New,
            "open" if !rest.is_empty() => Command::Open(rest.into()),
            "open" => return Err(CommandError::Usage("open PATH")),
            "save" => Command::Save,
            "save-as" if !rest.is_empty() => Command::SaveAs(rest.into()),
            "save-as" => return Err(CommandError::Usage("save-as PATH")),
            "tab" => TabKind::from_label(rest)
                .map(Command::Tab)
                .ok_or(CommandError::Usage("tab ingredients|recipes"))?,
            "list" | "ls" => Command::List,
            "show" => Command::Show,
            "select" => Command::Select(parse_index(rest, "select N")?),
            "set" => {
                let (field, value) = split_word(rest);
                let field = Field::from_label(field)
                    .ok_or(CommandError::Usage("set id|name|duration VALUE"))?;
                Command::Set(field, value.to_owned())
            }
            "confirm" => Command::Confirm,
            "cancel" => Command::Cancel,
            "add" => Command::Add(rest.to_owned()),
            "remove" | "rm" => Command::Remove,
            "row" => Self::parse_row(rest)?,
            "options" => {
                const USAGE: &str = "options ingredient|product N";
                let (kind, row) = split_word(rest);
                let kind = RowKind::from_label(kind).ok_or(CommandError::Usage(USAGE))?;
                Command::Options(kind, parse_index(row, USAGE)?)
            }
            "warnings" => Command::Warnings,
            "log" if rest.is_empty() => Command::Log(20),
            "log" => Command::Log(parse_index(rest, "log [N]")?),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::UnknownCommand(word.to_owned())),
        };
        Ok(Some(command))
    }

    fn parse_row(text: &str) -> CommandResult<Command> {
        const USAGE: &str = "row add|remove|set ingredient|product ...";
        let (action, rest) = split_word(text);
        let (kind, rest) = split_word(rest);
        let kind = RowKind::from_label(kind).ok_or(CommandError::Usage(USAGE))?;

        match action {
            "add" => Ok(Command::RowAdd(kind)),
            "remove" | "rm" => Ok(Command::RowRemove(
                kind,
                parse_index(rest, "row remove ingredient|product N")?,
            )),
            "set" => {
                const SET_USAGE: &str = "row set ingredient|product N ITEM AMOUNT";
                let (row, rest) = split_word(rest);
                let row = parse_index(row, SET_USAGE)?;
                let (item, amount) = rest
                    .trim_end()
                    .rsplit_once(char::is_whitespace)
                    .ok_or(CommandError::Usage(SET_USAGE))?;
                Ok(Command::RowSet {
                    kind,
                    row,
                    item: item.trim_end().to_owned(),
                    amount: amount.to_owned(),
                })
            }
            _ => Err(CommandError::Usage(USAGE)),
        }
    }
}

fn list_lines<R: Record>(tab: &RecordTab<R>) -> Vec<String> {
    let labels = tab.labels();
    if labels.is_empty() {
        return vec![format!("({} is empty)", tab.table())];
    }
    labels
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let marker = if tab.selected() == Some(index) { '*' } else { ' ' };
            format!("{marker}{index:>3}: {name}")
        })
        .collect()
}

fn form_lines<R: Record>(tab: &RecordTab<R>) -> CommandResult<Vec<String>> {
    let index = tab.selected().ok_or(FormError::NoSelection)?;
    let mut lines = vec![format!("{} #{index}", tab.table())];
    for &field in R::fields() {
        lines.push(format!(
            "  {:<9}{}",
            field.label(),
            tab.draft(field).unwrap_or_default()
        ));
    }
    Ok(lines)
}

impl Session {
    /// Runs one command against the session.
    ///
    /// Form operations apply to the active tab; row commands always apply to
    /// the selected recipe, with the committed ingredients as the catalog.
    pub fn execute(&mut self, command: Command) -> CommandResult<Reply> {
        log::debug!("execute {command:?}");
        let reply = match command {
            Command::New => {
                self.new_document();
                Reply::none()
            }
            Command::Open(path) => {
                self.open(&path)?;
                Reply::none()
            }
            Command::Save => {
                self.save()?;
                let path = self.path().map(|p| p.display().to_string());
                Reply::line(format!("wrote {}", path.unwrap_or_default()))
            }
            Command::SaveAs(path) => {
                self.save_as(&path)?;
                Reply::line(format!("wrote {}", path.display()))
            }
            Command::Tab(kind) => {
                self.active = kind;
                Reply::line(format!("tab: {kind}"))
            }
            Command::List => Reply::Output(match self.active {
                TabKind::Ingredients => list_lines(&self.ingredients),
                TabKind::Recipes => list_lines(self.recipes.tab()),
            }),
            Command::Show => Reply::Output(self.show()?),
            Command::Select(index) => {
                match self.active {
                    TabKind::Ingredients => self.ingredients.select(index)?,
                    TabKind::Recipes => self.recipes.tab_mut().select(index)?,
                }
                Reply::Output(self.show()?)
            }
            Command::Set(field, value) => {
                let applied = match self.active {
                    TabKind::Ingredients => self.ingredients.set_field(field, value)?,
                    TabKind::Recipes => self.recipes.tab_mut().set_field(field, value)?,
                };
                if applied {
                    Reply::none()
                } else {
                    Reply::line("(form does not parse yet; entry unchanged)")
                }
            }
            Command::Confirm => {
                match self.active {
                    TabKind::Ingredients => self.ingredients.confirm()?,
                    TabKind::Recipes => self.recipes.tab_mut().confirm()?,
                }
                Reply::none()
            }
            Command::Cancel => {
                match self.active {
                    TabKind::Ingredients => self.ingredients.cancel(),
                    TabKind::Recipes => self.recipes.tab_mut().cancel(),
                }
                Reply::none()
            }
            Command::Add(name) => {
                let index = match self.active {
                    TabKind::Ingredients => self.ingredients.add_entry(&name)?,
                    TabKind::Recipes => self.recipes.tab_mut().add_entry(&name)?,
                };
                Reply::line(format!("added {name:?} at {index}"))
            }
            Command::Remove => {
                let name = match self.active {
                    TabKind::Ingredients => self.ingredients.remove_selected()?.name,
                    TabKind::Recipes => self.recipes.tab_mut().remove_selected()?.name,
                };
                Reply::line(format!("removed {name:?}"))
            }
            Command::RowAdd(kind) => {
                let row = self.recipes.add_row(kind)?;
                Reply::line(format!("added {kind} row {row}"))
            }
            Command::RowRemove(kind, row) => {
                self.recipes.remove_row(kind, row)?;
                Reply::none()
            }
            Command::RowSet {
                kind,
                row,
                item,
                amount,
            } => {
                let catalog = self.ingredients.rows().committed();
                self.recipes.set_row(kind, row, catalog, &item, &amount)?;
                Reply::none()
            }
            Command::Options(kind, row) => {
                let catalog = self.ingredients.rows().committed();
                let labels = self.recipes.row_labels(kind, catalog)?;
                let (current, _) = labels.get(row).ok_or(FormError::RowOutOfRange {
                    row,
                    len: labels.len(),
                })?;
                let options = RecipesTab::options(catalog, Some(current.as_str()));
                Reply::Output(options.into_iter().map(str::to_owned).collect())
            }
            Command::Warnings => {
                let warnings = self.detect_warnings();
                if warnings.is_empty() {
                    Reply::line("no warnings")
                } else {
                    Reply::Output(warnings)
                }
            }
            Command::Log(count) => Reply::Output(logging::recent(count)),
            Command::Help => Reply::Output(HELP.iter().map(|line| (*line).to_owned()).collect()),
            Command::Quit => {
                if self.is_dirty() {
                    log::warn!("quitting with unconfirmed edits");
                }
                Reply::Quit
            }
        };
        Ok(reply)
    }

    /// Form of the selected entry of the active tab, plus item rows for recipes.
    fn show(&self) -> CommandResult<Vec<String>> {
        match self.active {
            TabKind::Ingredients => form_lines(&self.ingredients),
            TabKind::Recipes => {
                let mut lines = form_lines(self.recipes.tab())?;
                let catalog = self.ingredients.rows().committed();
                for kind in [RowKind::Ingredient, RowKind::Product] {
                    for (row, (name, amount)) in
                        self.recipes.row_labels(kind, catalog)?.into_iter().enumerate()
                    {
                        lines.push(format!("  {kind} {row}: {name} x {amount}"));
                    }
                }
                Ok(lines)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::record::{Ingredient, ItemAmount};

    fn run(session: &mut Session, line: &str) -> CommandResult<Reply> {
        let command = Command::parse(line)?.expect("not a blank line");
        session.execute(command)
    }

    fn session_with_catalog() -> Session {
        let mut session = Session::new(true);
        for name in ["Flour", "Water", "Salt"] {
            run(&mut session, &format!("add {name}")).unwrap();
        }
        run(&mut session, "tab recipes").unwrap();
        run(&mut session, "add Bread").unwrap();
        session.pump_events();
        session
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("  # note").unwrap(), None);
        assert_eq!(Command::parse("SAVE").unwrap(), Some(Command::Save));
        assert_eq!(
            Command::parse("open data/my kitchen.yaml").unwrap(),
            Some(Command::Open("data/my kitchen.yaml".into()))
        );
        assert_eq!(
            Command::parse("tab Recipes").unwrap(),
            Some(Command::Tab(TabKind::Recipes))
        );
        assert_eq!(
            Command::parse("set name  Rye flour").unwrap(),
            Some(Command::Set(Field::Name, "Rye flour".into()))
        );
        assert_eq!(
            Command::parse("add Sea salt").unwrap(),
            Some(Command::Add("Sea salt".into()))
        );
        assert_eq!(Command::parse("log").unwrap(), Some(Command::Log(20)));
    }

    #[test]
    fn parse_row_commands() {
        assert_eq!(
            Command::parse("row add products").unwrap(),
            Some(Command::RowAdd(RowKind::Product))
        );
        assert_eq!(
            Command::parse("row remove ingredient 2").unwrap(),
            Some(Command::RowRemove(RowKind::Ingredient, 2))
        );
        assert_eq!(
            Command::parse("row set ingredient 0 Sea salt 12").unwrap(),
            Some(Command::RowSet {
                kind: RowKind::Ingredient,
                row: 0,
                item: "Sea salt".into(),
                amount: "12".into(),
            })
        );
        assert_eq!(
            Command::parse("options product 1").unwrap(),
            Some(Command::Options(RowKind::Product, 1))
        );
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            Command::parse("frobnicate"),
            Err(CommandError::UnknownCommand(word)) if word == "frobnicate"
        ));
        assert!(matches!(Command::parse("open"), Err(CommandError::Usage(_))));
        assert!(matches!(Command::parse("select x"), Err(CommandError::Usage(_))));
        assert!(matches!(Command::parse("set colour red"), Err(CommandError::Usage(_))));
        assert!(matches!(Command::parse("row set ingredient 0 Salt"), Err(CommandError::Usage(_))));
        assert!(matches!(Command::parse("row grow product"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn edit_and_confirm_on_active_tab() {
        let mut session = Session::new(true);
        run(&mut session, "add Flour").unwrap();
        let reply = run(&mut session, "select 0").unwrap();
        assert_eq!(
            reply,
            Reply::Output(vec![
                "Ingredients #0".into(),
                "  id       1".into(),
                "  name     Flour".into(),
            ])
        );

        run(&mut session, "set name Rye").unwrap();
        assert_eq!(
            run(&mut session, "list").unwrap(),
            Reply::Output(vec!["*  0: Flour".into()])
        );
        run(&mut session, "confirm").unwrap();
        assert_eq!(session.ingredients.records(), vec![Ingredient::new(1, "Rye")]);
    }

    #[test]
    fn unparsed_field_is_held() {
        let mut session = Session::new(true);
        run(&mut session, "add Flour").unwrap();
        run(&mut session, "select 0").unwrap();
        let reply = run(&mut session, "set id 1a").unwrap();
        assert_eq!(
            reply,
            Reply::line("(form does not parse yet; entry unchanged)")
        );
        let err = run(&mut session, "confirm").unwrap_err();
        assert_eq!(err.banner(), "Invalid input");
        run(&mut session, "cancel").unwrap();
        run(&mut session, "confirm").unwrap();
    }

    #[test]
    fn recipe_rows_use_ingredient_catalog() {
        let mut session = session_with_catalog();
        run(&mut session, "select 0").unwrap();
        run(&mut session, "row add ingredient").unwrap();
        run(&mut session, "row set ingredient 0 Water 3").unwrap();
        run(&mut session, "row add product").unwrap();

        let reply = run(&mut session, "show").unwrap();
        assert_eq!(
            reply,
            Reply::Output(vec![
                "Recipes #0".into(),
                "  id       1".into(),
                "  name     Bread".into(),
                "  duration 0".into(),
                "  ingredient 0: Water x 3".into(),
                "  product 0: Flour x 0".into(),
            ])
        );

        assert_eq!(
            run(&mut session, "options ingredient 0").unwrap(),
            Reply::Output(vec!["Flour".into(), "Salt".into()])
        );

        let err = run(&mut session, "row set ingredient 0 Butter 1").unwrap_err();
        assert!(matches!(err, CommandError::Form(FormError::UnknownItem(_))));

        run(&mut session, "confirm").unwrap();
        let saved = session.recipes.tab().records();
        assert_eq!(saved[0].ingredients, vec![ItemAmount { id: 2, amount: 3 }]);
        assert_eq!(saved[0].products, vec![ItemAmount::PLACEHOLDER]);
    }

    #[test]
    fn remove_and_warnings() {
        let mut session = Session::new(false);
        run(&mut session, "add a").unwrap();
        run(&mut session, "add b").unwrap();
        assert_eq!(run(&mut session, "warnings").unwrap(), Reply::line("no warnings"));

        run(&mut session, "select 0").unwrap();
        assert_eq!(run(&mut session, "remove").unwrap(), Reply::line("removed \"a\""));
        run(&mut session, "add c").unwrap();
        assert_eq!(
            run(&mut session, "warnings").unwrap(),
            Reply::Output(vec![
                r#"Warning! Duplicate ID: [2] found in entries: ["b", "c"]"#.into()
            ])
        );
    }

    #[test]
    fn form_commands_need_selection() {
        let mut session = Session::new(true);
        for line in ["show", "set name x", "confirm", "remove", "row add ingredient"] {
            let err = run(&mut session, line).unwrap_err();
            assert!(
                matches!(err, CommandError::Form(FormError::NoSelection)),
                "{line}: {err}"
            );
        }
        assert_eq!(run(&mut session, "quit").unwrap(), Reply::Quit);
    }
}
