use crate::mailer::{ContactError, ContactForm, ContactMailer};
use crate::storefront::{Action, Storefront};
use crate::types::DishId;
use log::warn;
use std::io::{self, Write};

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Exit,
    Clear,
    Go(String),
    Act(Action),
    Basket,
    Send,
    Usage(&'static str),
    Unknown(String),
}

/// Parses a shell line. `:` works as an alias for the `/` prefix; empty
/// lines yield `None`.
pub fn parse_command(line: &str) -> Option<ShellCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let body = line
        .strip_prefix('/')
        .or_else(|| line.strip_prefix(':'))
        .unwrap_or(line);
    let mut parts = body.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    let cmd = match (name, args.as_slice()) {
        ("help", _) => ShellCommand::Help,
        ("exit" | "quit", _) => ShellCommand::Exit,
        ("clear", _) => ShellCommand::Clear,
        ("home", _) => ShellCommand::Go("/".to_string()),
        ("menu", _) => ShellCommand::Go("/menu".to_string()),
        ("order", _) => ShellCommand::Go("/order".to_string()),
        ("about", _) => ShellCommand::Go("/about".to_string()),
        ("contact", _) => ShellCommand::Go("/contact".to_string()),
        ("go", [path]) => ShellCommand::Go((*path).to_string()),
        ("go", _) => ShellCommand::Usage("usage: /go <path>"),
        ("dish", [id]) => ShellCommand::Go(format!("/dish/{id}")),
        ("dish", _) => ShellCommand::Usage("usage: /dish <id>"),
        ("add", [id]) => id_action(id, Action::Add, "usage: /add <id>"),
        ("inc", [id]) => id_action(id, Action::Increase, "usage: /inc <id>"),
        ("dec", [id]) => id_action(id, Action::Decrease, "usage: /dec <id>"),
        ("remove", [id]) => id_action(id, Action::Remove, "usage: /remove <id>"),
        ("set", [id, qty]) => match (parse_id(id), qty.parse::<u32>()) {
            (Some(id), Ok(qty)) => ShellCommand::Act(Action::SetQuantity(id, qty)),
            _ => ShellCommand::Usage("usage: /set <id> <quantity>"),
        },
        ("add" | "inc" | "dec" | "remove", _) => {
            ShellCommand::Usage("usage: /<add|inc|dec|remove> <id>")
        }
        ("set", _) => ShellCommand::Usage("usage: /set <id> <quantity>"),
        ("checkout", _) => ShellCommand::Act(Action::Checkout),
        ("basket", _) => ShellCommand::Basket,
        ("send", _) => ShellCommand::Send,
        _ => ShellCommand::Unknown(line.to_string()),
    };
    Some(cmd)
}

fn parse_id(raw: &str) -> Option<DishId> {
    raw.parse::<u32>().ok().map(DishId)
}

fn id_action(raw: &str, make: fn(DishId) -> Action, usage: &'static str) -> ShellCommand {
    match parse_id(raw) {
        Some(id) => ShellCommand::Act(make(id)),
        None => ShellCommand::Usage(usage),
    }
}

/// Interactive storefront. The storefront, and with it the basket, lives
/// exactly as long as this loop.
pub async fn run_shell<M: ContactMailer>(
    mut storefront: Storefront,
    mailer: M,
) -> anyhow::Result<()> {
    println!("{}", storefront.nav());
    println!("{}", storefront.navigate("/"));
    println!("{}", storefront.footer());
    println!("Type /help for commands. Use /exit to quit.");
    loop {
        print!("{}> ", storefront.current_route());
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let Some(cmd) = parse_command(&line) else {
            continue;
        };

        match cmd {
            ShellCommand::Help => print_help(),
            ShellCommand::Exit => break,
            ShellCommand::Clear => {
                print!("\x1B[2J\x1B[1;1H");
                io::stdout().flush()?;
            }
            ShellCommand::Go(path) => {
                let page = storefront.navigate(&path);
                println!("{}", storefront.nav());
                println!("{page}");
                println!("{}", storefront.footer());
            }
            ShellCommand::Act(action) => {
                println!("{}", storefront.apply(action));
                println!("{}", storefront.nav());
            }
            ShellCommand::Basket => {
                println!("{}", crate::views::basket_lines(storefront.basket()));
            }
            ShellCommand::Send => match read_contact_form()? {
                Some(form) => match mailer.send(&form).await {
                    Ok(_) => println!("Your message has been sent!"),
                    Err(e) => print_send_error(e),
                },
                None => println!("message cancelled"),
            },
            ShellCommand::Usage(usage) => println!("{usage}"),
            ShellCommand::Unknown(line) => println!("unknown command: {line}. try /help"),
        }
    }
    Ok(())
}

fn read_contact_form() -> anyhow::Result<Option<ContactForm>> {
    let Some(name) = prompt_line("Name")? else {
        return Ok(None);
    };
    let Some(email) = prompt_line("Email")? else {
        return Ok(None);
    };
    let Some(message) = prompt_line("Message")? else {
        return Ok(None);
    };
    Ok(Some(ContactForm::new(name, email, message)))
}

fn prompt_line(label: &str) -> anyhow::Result<Option<String>> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut answer = String::new();
    if io::stdin().read_line(&mut answer)? == 0 {
        return Ok(None);
    }
    Ok(Some(answer.trim().to_string()))
}

fn print_send_error(err: ContactError) {
    match err {
        ContactError::Invalid(reason) => println!("please fix the form: {reason}"),
        other => {
            warn!("contact send failed: {other}");
            println!("Failed to send message. Please try again. ({other})");
        }
    }
}

fn print_help() {
    println!("Storefront Commands");
    println!("  /help                  show this help");
    println!("  /exit | /quit          leave the shop (the basket is discarded)");
    println!("  /clear                 clear terminal");
    println!("  /home /menu /order     open a page");
    println!("  /about /contact        open a page");
    println!("  /go <path>             open any path, e.g. /go /dish/3");
    println!("  /dish <id>             show a dish");
    println!("  /add <id>              add a dish to your order");
    println!("  /inc <id> | /dec <id>  step a dish's quantity up or down");
    println!("  /remove <id>           remove a dish's line from your order");
    println!("  /set <id> <qty>        set a dish's quantity");
    println!("  /basket                show raw basket lines");
    println!("  /checkout              proceed to checkout");
    println!("  /send                  send us a message");
}
