//! Interactive shell
//!
//! Line-oriented driver for the application core: the stand-in for the
//! billing and admin screens. One command per line; network calls happen
//! only in response to commands, and the confirm command is the single
//! submit trigger.

use crate::admin::{InventoryBoard, ProductAdmin, ReportsView, StaffDirectory};
use crate::app::PosApp;
use crate::error::PosError;
use crate::navigation::{AdminPage, Screen, StaffPage};
use crate::payment::{PaymentState, Receipt};
use espresso_client::PosApi;
use shared::models::{HistoryFilter, PaymentMethod, ProductCreate, StaffCreate};
use shared::money::format_amount;
use std::io::{BufRead, Write};

/// Run the shell until `quit` or end of input
pub async fn run<A: PosApi>(mut app: PosApp<A>) -> anyhow::Result<()> {
    println!("Espresso POS");
    if let Some(session) = app.session() {
        println!("Welcome back, {} ({})", session.username, session.role);
    } else {
        println!("Type `login <username> <password>` to begin, `help` for commands.");
    }

    let mut token: Option<String> = None;
    let mut staff_dir = StaffDirectory::new();
    let mut product_admin = ProductAdmin::new();
    let mut inventory = InventoryBoard::new();
    let mut reports = ReportsView::new();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let screen = app.screen(token.as_deref());
        print_prompt(&screen, app.payment().state());

        let Some(line) = lines.next() else { break };
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some(&cmd) = words.first() else { continue };

        match cmd {
            "quit" | "exit" => break,
            "help" => print_help(&screen),
            "logout" => {
                app.logout();
                token = None;
            }
            _ => {
                let result = match screen {
                    Screen::Login => handle_login(&mut app, cmd, &words).await,
                    Screen::Staff(page) => {
                        handle_staff(&mut app, &mut token, page, cmd, &words).await
                    }
                    Screen::Admin(page) => {
                        handle_admin(
                            &mut app,
                            &mut token,
                            page,
                            cmd,
                            &words,
                            &mut staff_dir,
                            &mut product_admin,
                            &mut inventory,
                            &mut reports,
                        )
                        .await
                    }
                };
                if let Err(e) = result {
                    println!("!! {}", e);
                }
            }
        }
    }

    Ok(())
}

fn print_prompt(screen: &Screen, payment: &PaymentState) {
    let label = match screen {
        Screen::Login => "login".to_string(),
        Screen::Staff(StaffPage::Pos) => match payment {
            PaymentState::Idle => "pos".to_string(),
            PaymentState::SelectingMethod => "pos/pay:method".to_string(),
            PaymentState::AwaitingCashAmount => "pos/pay:cash-amount".to_string(),
            PaymentState::ReadyToSubmit { .. } => "pos/pay:ready".to_string(),
            PaymentState::Submitting { .. } => "pos/pay:submitting".to_string(),
        },
        Screen::Staff(StaffPage::History) => "history".to_string(),
        Screen::Admin(page) => format!("admin/{:?}", page).to_lowercase(),
    };
    print!("{}> ", label);
    let _ = std::io::stdout().flush();
}

fn print_help(screen: &Screen) {
    match screen {
        Screen::Login => println!("Commands: login <username> <password> | quit"),
        Screen::Staff(StaffPage::Pos) => println!(
            "Commands: products | add <id> | inc <id> | dec <id> | rm <id> | cart | \
             pay | cash <amount> | upi | confirm | cancel | go history | logout | quit"
        ),
        Screen::Staff(StaffPage::History) => println!(
            "Commands: list | list today | range <from> <to> | bill <id> | go pos | logout | quit"
        ),
        Screen::Admin(_) => println!(
            "Commands: go <dashboard|bills|reports|inventory|products|staff> | show | \
             stock <id> <qty> | addp <name> <price> <category> | delp <id> | \
             adds <username> <password> <role> | toggle <id> | dels <id> | \
             bill <id> | logout | quit"
        ),
    }
}

async fn handle_login<A: PosApi>(
    app: &mut PosApp<A>,
    cmd: &str,
    words: &[&str],
) -> Result<(), PosError> {
    match (cmd, words) {
        ("login", [_, username, password]) => {
            let session = app.login(username, password).await?;
            println!("Logged in as {} ({})", session.username, session.role);
            Ok(())
        }
        ("login", _) => Err(PosError::Validation(
            "Usage: login <username> <password>".to_string(),
        )),
        _ => Err(PosError::Validation(format!("Unknown command: {}", cmd))),
    }
}

async fn handle_staff<A: PosApi>(
    app: &mut PosApp<A>,
    token: &mut Option<String>,
    page: StaffPage,
    cmd: &str,
    words: &[&str],
) -> Result<(), PosError> {
    match (page, cmd) {
        (_, "go") => {
            *token = words.get(1).map(|s| s.to_string());
            Ok(())
        }
        (StaffPage::Pos, "products") => {
            app.refresh_catalog().await?;
            for p in app.catalog().products() {
                let marker = if app.catalog().is_available(p.id) {
                    ""
                } else {
                    "  [low stock]"
                };
                println!("{:>4}  {:<24} {}{}", p.id, p.name, format_amount(p.price), marker);
            }
            Ok(())
        }
        (StaffPage::Pos, "add") => {
            let id = parse_id(words.get(1))?;
            app.add_to_cart(id)?;
            print_cart(app);
            Ok(())
        }
        (StaffPage::Pos, "inc") => {
            app.increment_line(parse_id(words.get(1))?);
            print_cart(app);
            Ok(())
        }
        (StaffPage::Pos, "dec") => {
            app.decrement_line(parse_id(words.get(1))?);
            print_cart(app);
            Ok(())
        }
        (StaffPage::Pos, "rm") => {
            app.remove_line(parse_id(words.get(1))?);
            print_cart(app);
            Ok(())
        }
        (StaffPage::Pos, "cart") => {
            print_cart(app);
            Ok(())
        }
        (StaffPage::Pos, "pay") => {
            app.open_payment()?;
            println!("Payment method? (`cash <amount>` or `upi`)");
            Ok(())
        }
        (StaffPage::Pos, "cash") => {
            app.choose_method(PaymentMethod::Cash)?;
            if let Some(raw) = words.get(1) {
                let amount: f64 = raw
                    .parse()
                    .map_err(|_| PosError::Validation("Invalid amount".to_string()))?;
                app.enter_cash_amount(amount)?;
                println!("Cash {} — `confirm` to submit", format_amount(amount));
            } else {
                println!("Cash given? (`cash <amount>`)");
            }
            Ok(())
        }
        (StaffPage::Pos, "upi") => {
            app.choose_method(PaymentMethod::Upi)?;
            println!("UPI — `confirm` to submit");
            Ok(())
        }
        (StaffPage::Pos, "confirm") => {
            let receipt = app.confirm_payment().await?;
            print_receipt(&receipt);
            Ok(())
        }
        (StaffPage::Pos, "cancel") => {
            app.cancel_payment()?;
            println!("Payment cancelled, cart kept.");
            Ok(())
        }
        (StaffPage::History, "list") => {
            let filter = if words.get(1) == Some(&"today") {
                HistoryFilter::Today
            } else {
                HistoryFilter::All
            };
            print_history(app, &filter).await
        }
        (StaffPage::History, "range") => {
            let (Some(from), Some(to)) = (words.get(1), words.get(2)) else {
                return Err(PosError::Validation("Usage: range <from> <to>".to_string()));
            };
            let filter = HistoryFilter::Range {
                from: from.to_string(),
                to: to.to_string(),
            };
            print_history(app, &filter).await
        }
        (StaffPage::History, "bill") => {
            let bill = app.bill_detail(parse_id(words.get(1))?).await?;
            println!("Bill {}  {}", bill.bill_number, bill.payment_method);
            for item in &bill.items {
                println!(
                    "  {} × {}  {}",
                    item.product_name,
                    item.quantity,
                    format_amount(shared::money::line_total(item.price, item.quantity))
                );
            }
            println!("  Total {}", format_amount(bill.total_amount));
            Ok(())
        }
        _ => Err(PosError::Validation(format!("Unknown command: {}", cmd))),
    }
}

#[allow(clippy::too_many_arguments)]
async fn handle_admin<A: PosApi>(
    app: &mut PosApp<A>,
    token: &mut Option<String>,
    page: AdminPage,
    cmd: &str,
    words: &[&str],
    staff_dir: &mut StaffDirectory,
    product_admin: &mut ProductAdmin,
    inventory: &mut InventoryBoard,
    reports: &mut ReportsView,
) -> Result<(), PosError> {
    match (page, cmd) {
        (_, "go") => {
            *token = words.get(1).map(|s| s.to_string());
            Ok(())
        }
        (AdminPage::Dashboard | AdminPage::Reports, "show") => {
            reports.reload(app.api()).await?;
            if let Some(daily) = reports.daily() {
                println!(
                    "{}  orders: {}  revenue: {}",
                    daily.date,
                    daily.total_orders,
                    format_amount(daily.total_revenue)
                );
                for top in &daily.top_products {
                    println!(
                        "  {} × {}  {}",
                        top.product_name,
                        top.quantity_sold,
                        format_amount(top.revenue)
                    );
                }
            }
            Ok(())
        }
        (AdminPage::Bills, "show") => print_history(app, &HistoryFilter::All).await,
        (AdminPage::Bills, "bill") => {
            let bill = app.bill_detail(parse_id(words.get(1))?).await?;
            println!(
                "Bill {}  {}  {}",
                bill.bill_number,
                bill.payment_method,
                format_amount(bill.total_amount)
            );
            Ok(())
        }
        (AdminPage::Inventory, "show") => {
            inventory.reload(app.api()).await?;
            for ing in inventory.ingredients() {
                let marker = if inventory.is_low(ing.id) { "  [LOW]" } else { "" };
                println!("{:>4}  {:<24} {}{}", ing.id, ing.name, ing.current_stock, marker);
            }
            Ok(())
        }
        (AdminPage::Inventory, "stock") => {
            let id = parse_id(words.get(1))?;
            let qty: f64 = words
                .get(2)
                .and_then(|w| w.parse().ok())
                .ok_or_else(|| PosError::Validation("Usage: stock <id> <qty>".to_string()))?;
            inventory.set_stock(app.api(), id, qty).await?;
            println!("Stock updated.");
            Ok(())
        }
        (AdminPage::Products, "show") => {
            product_admin.reload(app.api()).await?;
            for p in product_admin.products() {
                println!("{:>4}  {:<24} {}  {}", p.id, p.name, format_amount(p.price), p.category);
            }
            Ok(())
        }
        (AdminPage::Products, "addp") => {
            let (Some(name), Some(price), Some(category)) =
                (words.get(1), words.get(2), words.get(3))
            else {
                return Err(PosError::Validation(
                    "Usage: addp <name> <price> <category>".to_string(),
                ));
            };
            let price: f64 = price
                .parse()
                .map_err(|_| PosError::Validation("Invalid price".to_string()))?;
            product_admin
                .add(
                    app.api(),
                    ProductCreate {
                        name: name.to_string(),
                        price,
                        category: category.to_string(),
                    },
                )
                .await?;
            println!("Product added.");
            Ok(())
        }
        (AdminPage::Products, "delp") => {
            product_admin.remove(app.api(), parse_id(words.get(1))?).await?;
            println!("Product deleted.");
            Ok(())
        }
        (AdminPage::Staff, "show") => {
            staff_dir.reload(app.api()).await?;
            for s in staff_dir.staff() {
                let flag = if s.is_active { "active" } else { "inactive" };
                println!("{:>4}  {:<16} {:<6} {}", s.id, s.username, s.role, flag);
            }
            Ok(())
        }
        (AdminPage::Staff, "adds") => {
            let (Some(username), Some(password), Some(role)) =
                (words.get(1), words.get(2), words.get(3))
            else {
                return Err(PosError::Validation(
                    "Usage: adds <username> <password> <role>".to_string(),
                ));
            };
            staff_dir
                .add(
                    app.api(),
                    StaffCreate {
                        username: username.to_string(),
                        password: password.to_string(),
                        role: role.to_string(),
                    },
                )
                .await?;
            println!("Staff added.");
            Ok(())
        }
        (AdminPage::Staff, "toggle") => {
            staff_dir.toggle_active(app.api(), parse_id(words.get(1))?).await?;
            println!("Toggled.");
            Ok(())
        }
        (AdminPage::Staff, "dels") => {
            staff_dir.remove(app.api(), parse_id(words.get(1))?).await?;
            println!("Staff deleted.");
            Ok(())
        }
        _ => Err(PosError::Validation(format!("Unknown command: {}", cmd))),
    }
}

fn parse_id(word: Option<&&str>) -> Result<i64, PosError> {
    word.and_then(|w| w.parse().ok())
        .ok_or_else(|| PosError::Validation("Expected a numeric id".to_string()))
}

fn print_cart<A: PosApi>(app: &PosApp<A>) {
    for line in app.cart().lines() {
        println!(
            "  {} × {}  {}",
            line.name,
            line.quantity,
            format_amount(line.line_total())
        );
    }
    println!("  Total {}", format_amount(app.cart().total()));
}

async fn print_history<A: PosApi>(
    app: &PosApp<A>,
    filter: &HistoryFilter,
) -> Result<(), PosError> {
    let bills = app.bill_history(filter).await?;
    if bills.is_empty() {
        println!("No bills found.");
        return Ok(());
    }
    for bill in &bills {
        println!(
            "{:>4}  {}  {}  {}  {}",
            bill.id,
            bill.bill_number,
            bill.created_at.format("%Y-%m-%d %H:%M"),
            bill.payment_method,
            format_amount(bill.total_amount)
        );
    }
    Ok(())
}

fn print_receipt(receipt: &Receipt) {
    println!("Payment successful");
    println!("  Bill: {}", receipt.bill_number);
    println!("  Total: {}", format_amount(receipt.total_amount));
    println!("  Payment: {}", receipt.payment_method);
    if let (Some(tendered), Some(change)) = (receipt.tendered, receipt.change) {
        println!("  Cash given: {}", format_amount(tendered));
        println!("  Change: {}", format_amount(change));
    }
}
