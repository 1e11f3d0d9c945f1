//! Screens and messages rendered into [`View`]s.

use std::fmt::Write as _;

use almacen_core::AlmacenError;
use almacen_core::catalog::{self, Category};
use almacen_core::command::builtin_commands;
use almacen_core::inventory::{Inventory, MutationOutcome, StockLevel, StockOperation};
use almacen_core::navigation::{Action, PRICE_INPUT_ID, Screen};

use crate::view::{Button, ButtonStyle, Colour, PriceForm, View};

/// Amount shortcuts offered on the quantity screen.
pub const QUANTITY_SHORTCUTS: [(u64, &str, ButtonStyle); 7] = [
    (1, "1️⃣", ButtonStyle::Primary),
    (2, "2️⃣", ButtonStyle::Primary),
    (3, "3️⃣", ButtonStyle::Primary),
    (5, "5️⃣", ButtonStyle::Primary),
    (10, "🔟", ButtonStyle::Primary),
    (25, "🔥", ButtonStyle::Danger),
    (50, "💥", ButtonStyle::Danger),
];

const MENU_TITLE: &str = "🎮 Inventario GTA RP";
const GENERIC_FAILURE: &str = "❌ Error procesando operación";

fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

fn home_button(label: &str) -> Button {
    Button::new(&Action::Home, label, "🏠", ButtonStyle::Secondary)
}

fn back_button() -> Button {
    Button::new(&Action::Back, "Volver", "⬅️", ButtonStyle::Secondary)
}

fn manage_button(item: &str) -> Button {
    Button::new(
        &Action::Product { item: item.to_string() },
        "Gestionar Producto",
        "🔄",
        ButtonStyle::Primary,
    )
}

/// Renders the screen a navigation transition leads to.
pub fn screen(screen: &Screen, inventory: &Inventory) -> View {
    match screen {
        Screen::Home => home(),
        Screen::Category { category: c } => category(*c, inventory),
        Screen::Product { item, .. } => product(item, inventory),
        Screen::Quantity { item, operation, .. } => quantity(item, *operation, inventory),
    }
}

pub fn home() -> View {
    let mut description = String::from("**Selecciona una categoría para gestionar:**\n\n");
    for category in Category::all() {
        let _ = writeln!(
            description,
            "{} **{}** - {}",
            category.emoji(),
            category.label(),
            category.summary()
        );
    }
    description.push_str("\n📊 **Ver stock completo**");

    View::new(MENU_TITLE, Colour::BLUE)
        .description(description)
        .buttons(Category::all().map(|category| {
            Button::new(
                &Action::Category(category),
                category.label(),
                category.emoji(),
                ButtonStyle::Primary,
            )
        }))
        .button(Button::new(
            &Action::FullStock,
            "Stock Completo",
            "📊",
            ButtonStyle::Secondary,
        ))
}

pub fn category(category: Category, inventory: &Inventory) -> View {
    let mut description = String::from("**Productos disponibles:**\n\n");
    for item in catalog::items_in(category) {
        let entry = inventory.entry_or_default(item.name);
        let _ = writeln!(
            description,
            "{} {} **{}** - Stock: **{}** - 💵 {}",
            entry.level().marker(),
            item.emoji,
            item.name,
            entry.quantity,
            money(entry.unit_price)
        );
    }
    description.push_str("\n**Selecciona un producto para gestionar:**");

    View::new(
        format!("{} {}", category.emoji(), category.label()),
        Colour::GREEN,
    )
    .description(description)
    .buttons(catalog::items_in(category).map(|item| {
        Button::new(
            &Action::Product {
                item: item.name.to_string(),
            },
            item.name,
            item.emoji,
            ButtonStyle::Success,
        )
    }))
    .button(home_button("Inicio"))
}

pub fn product(item: &str, inventory: &Inventory) -> View {
    let entry = inventory.entry_or_default(item);
    let description = format!(
        "**Stock actual: {}** {}\n💵 **Precio unitario:** {}\n\n\
         **¿Qué operación deseas realizar?**\n\n\
         ➕ **Agregar** - Aumentar stock\n\
         ➖ **Retirar** - Reducir stock\n\
         💰 **Cambiar precio**",
        entry.quantity,
        entry.level().label(),
        money(entry.unit_price)
    );
    let owned = item.to_string();

    View::new(
        format!("{} {}", catalog::emoji_for(item), item.to_uppercase()),
        Colour::YELLOW,
    )
    .description(description)
    .button(Button::new(
        &Action::Operation {
            operation: StockOperation::Add,
            item: owned.clone(),
        },
        "Agregar Stock",
        "➕",
        ButtonStyle::Success,
    ))
    .button(Button::new(
        &Action::Operation {
            operation: StockOperation::Remove,
            item: owned.clone(),
        },
        "Retirar Stock",
        "➖",
        ButtonStyle::Danger,
    ))
    .button(Button::new(
        &Action::OpenPrice { item: owned },
        "Cambiar Precio",
        "💰",
        ButtonStyle::Secondary,
    ))
    .button(back_button())
    .button(home_button("Inicio"))
}

pub fn quantity(item: &str, operation: StockOperation, inventory: &Inventory) -> View {
    let (title, colour) = match operation {
        StockOperation::Add => ("Agregar Stock", Colour::GREEN),
        StockOperation::Remove => ("Retirar Stock", Colour::RED),
    };
    let stock = inventory.entry_or_default(item).quantity;

    View::new(format!("{} {title}", catalog::emoji_for(item)), colour)
        .description(format!(
            "**Producto:** {item}\n**Stock actual:** {stock}\n\n**Selecciona la cantidad:**"
        ))
        .buttons(QUANTITY_SHORTCUTS.iter().map(|(amount, emoji, style)| {
            Button::new(
                &Action::Quantity {
                    operation,
                    item: item.to_string(),
                    amount: *amount,
                },
                amount.to_string(),
                *emoji,
                *style,
            )
        }))
        .button(back_button())
        .button(home_button("Inicio"))
}

/// Result screen of a stock change.
pub fn outcome(outcome: &MutationOutcome) -> View {
    let emoji = catalog::emoji_for(outcome.item());
    let (description, colour) = match outcome {
        MutationOutcome::Added {
            item,
            added,
            quantity,
        } => (
            format!(
                "✅ **OPERACIÓN EXITOSA**\n\n{emoji} **{item}**\n\
                 ➕ **Agregado:** {added} unidades\n📊 **Nuevo stock:** {quantity}"
            ),
            Colour::GREEN,
        ),
        MutationOutcome::Removed {
            item,
            removed,
            remaining,
            unit_price,
            total,
        } => (
            format!(
                "📤 **OPERACIÓN EXITOSA**\n\n{emoji} **{item}**\n\
                 ➖ **Retirado:** {removed} unidades\n📊 **Stock restante:** {remaining}\n\
                 💵 **Precio unitario:** {}\n🧾 **Total generado:** {}",
                money(*unit_price),
                money(*total)
            ),
            Colour::RED,
        ),
        MutationOutcome::InsufficientStock {
            item,
            requested,
            available,
        } => (
            format!(
                "❌ **STOCK INSUFICIENTE**\n\n{emoji} **{item}**\n\
                 📊 **Stock disponible:** {available}\n🚫 **Cantidad solicitada:** {requested}"
            ),
            Colour::RED,
        ),
        MutationOutcome::PriceSet { item, unit_price } => {
            return price_updated(item, *unit_price);
        }
    };

    View::new("⚡ Resultado de Operación", colour)
        .description(description)
        .button(manage_button(outcome.item()))
        .button(back_button())
        .button(home_button("Inicio"))
}

/// Confirmation posted after a price form is submitted.
pub fn price_updated(item: &str, unit_price: f64) -> View {
    View::new("✅ Precio Actualizado", Colour::GREEN)
        .description(format!(
            "{} **{item}**\n💰 **Nuevo precio:** {}\n\n¿Qué deseas hacer ahora?",
            catalog::emoji_for(item),
            money(unit_price)
        ))
        .button(manage_button(item))
        .button(home_button("Inicio"))
}

pub fn price_form(item: &str) -> PriceForm {
    PriceForm {
        custom_id: Action::SubmitPrice {
            item: item.to_string(),
        }
        .custom_id(),
        title: format!("💰 Cambiar Precio - {item}"),
        input_id: PRICE_INPUT_ID.to_string(),
        label: "Nuevo Precio (solo números)".to_string(),
        placeholder: "Ejemplo: 150.50".to_string(),
        min_length: 1,
        max_length: 10,
    }
}

fn stock_line(marker: &str, emoji: &str, item: &str, quantity: u64, unit_price: f64) -> String {
    format!(
        "{marker} {emoji} {item}: **{quantity}u** - 💵 {}\n",
        money(unit_price)
    )
}

/// Every catalog item grouped by category.
pub fn full_stock(inventory: &Inventory) -> View {
    let mut description = String::new();
    for category in Category::all() {
        let _ = writeln!(
            description,
            "\n**{} {}:**",
            category.emoji(),
            category.as_ref().to_uppercase()
        );
        for item in catalog::items_in(category) {
            let entry = inventory.entry_or_default(item.name);
            description.push_str(&stock_line(
                entry.level().marker(),
                item.emoji,
                item.name,
                entry.quantity,
                entry.unit_price,
            ));
        }
    }

    View::new("📊 Stock Completo", Colour::CYAN)
        .description(description)
        .button(home_button("Volver al Inicio"))
}

/// Flat listing with the total inventory value, for the `stock` command.
pub fn quick_stock(inventory: &Inventory) -> View {
    let mut description = String::from("**📊 STOCK RÁPIDO:**\n\n");
    for item in catalog::all_items() {
        let entry = inventory.entry_or_default(item.name);
        description.push_str(&stock_line(
            entry.level().marker(),
            item.emoji,
            item.name,
            entry.quantity,
            entry.unit_price,
        ));
    }
    let _ = write!(
        description,
        "\n💰 **Valor total del inventario:** {}",
        money(inventory.total_value())
    );

    View::new("📋 Stock Completo", Colour::CYAN).description(description)
}

/// Search results for `term`, or a not-found message when nothing matches.
pub fn search(term: &str, inventory: &Inventory) -> View {
    let found = catalog::search(term);
    if found.is_empty() {
        return View::new("❌ No encontrado", Colour::RED)
            .description(format!("Sin resultados para: **{term}**"));
    }

    let mut description = format!("**🔍 \"{term}\":**\n\n");
    for item in found {
        let entry = inventory.entry_or_default(item.name);
        let _ = writeln!(
            description,
            "{}{} **{}**: {}u - 💵 {}",
            StockLevel::of(entry.quantity).marker(),
            item.emoji,
            item.name,
            entry.quantity,
            money(entry.unit_price)
        );
    }
    View::new("📋 Encontrado", Colour::GREEN).description(description)
}

pub fn help() -> View {
    let mut description = String::from("**COMANDOS:**\n");
    for command in builtin_commands() {
        let _ = writeln!(
            description,
            "• `{}` - {}",
            command.usage, command.description
        );
    }
    description.push_str(
        "\n**USO:**\n🖱️ **Clickea los botones** para navegar\n\
         ✅ **Interfaz intuitiva** con botones\n\
         ⚡ **Operaciones rápidas** (1-50 unidades)\n\n\
         **ESTADOS:**\n🟢 Stock Normal | 🟡 Stock Bajo | 🔴 Agotado",
    );
    View::new("🔫 Guía del Bot", Colour::DARK_RED).description(description)
}

/// Keep-alive notice posted after a period without user activity.
pub fn keepalive(message: &str, uptime_minutes: u64, refresh: u64) -> View {
    View::new("🤖 Sistema Activo", Colour::GREEN)
        .description(format!(
            "{message}\n\n🕐 **Uptime:** {uptime_minutes} minutos\n📈 **Refresh #{refresh}**"
        ))
        .footer("Mantenimiento automático")
}

/// Text shown to the acting user when an interaction fails.
///
/// Validation errors are explained; anything else gets a generic message.
pub fn error_message(error: &AlmacenError) -> String {
    match error {
        AlmacenError::NotFound {
            entity_type: "category",
            ..
        } => "❌ Categoría no encontrada".to_string(),
        AlmacenError::NotFound { id, .. } => format!("❌ Producto no encontrado: {id}"),
        AlmacenError::InvalidAmount(raw) => format!("❌ Cantidad inválida: {raw}"),
        AlmacenError::InvalidPrice(_) => {
            "❌ Precio inválido. Debe ser un número positivo.".to_string()
        }
        AlmacenError::InvalidAction(_) => "❌ Formato de botón inválido".to_string(),
        _ => GENERIC_FAILURE.to_string(),
    }
}

/// Answer to buttons and forms used outside a server.
pub fn guild_only() -> String {
    "❌ Este bot solo funciona en servidores".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use almacen_core::inventory::StockEntry;

    fn inventory() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.insert("glock", StockEntry::new(12, 150.5));
        inventory.insert("pcp", StockEntry::new(3, 2.0));
        inventory
    }

    #[test]
    fn test_home_offers_every_category_and_full_stock() {
        let view = home();
        for category in Category::all() {
            assert!(view.has_button(&format!("cat_{category}")));
        }
        assert!(view.has_button("stock_completo"));
        assert_eq!(view.buttons.len(), 5);
    }

    #[test]
    fn test_category_lists_items_with_status() {
        let view = category(Category::Armas, &inventory());
        assert!(view.description.contains("🟢 🔫 **glock** - Stock: **12** - 💵 $150.50"));
        assert!(view.description.contains("🔴 🏹 **vintage** - Stock: **0**"));
        assert!(view.has_button("prod_Z2xvY2s="));
        assert!(view.has_button("home"));
    }

    #[test]
    fn test_product_screen_buttons() {
        let view = product("pcp", &inventory());
        assert_eq!(view.title, "💊 PCP");
        assert!(view.description.contains("🟡 Stock Bajo"));
        let ids: Vec<&str> = view.buttons.iter().map(|b| b.custom_id.as_str()).collect();
        assert_eq!(ids, ["op_add_cGNw", "op_remove_cGNw", "op_price_cGNw", "back", "home"]);
    }

    #[test]
    fn test_quantity_shortcuts_round_trip() {
        let view = quantity("cargador pistolas", StockOperation::Remove, &inventory());
        let amounts: Vec<u64> = view
            .buttons
            .iter()
            .filter_map(|b| match Action::parse(&b.custom_id).ok()? {
                Action::Quantity { amount, item, .. } if item == "cargador pistolas" => Some(amount),
                _ => None,
            })
            .collect();
        assert_eq!(amounts, [1, 2, 3, 5, 10, 25, 50]);
        assert_eq!(view.button_rows().count(), 2);
    }

    #[test]
    fn test_outcome_views() {
        let removed = outcome(&MutationOutcome::Removed {
            item: "glock".into(),
            removed: 5,
            remaining: 0,
            unit_price: 150.5,
            total: 752.5,
        });
        assert!(removed.description.contains("🧾 **Total generado:** $752.50"));
        assert!(removed.has_button("prod_Z2xvY2s="));
        assert!(removed.has_button("back"));

        let rejected = outcome(&MutationOutcome::InsufficientStock {
            item: "glock".into(),
            requested: 10,
            available: 5,
        });
        assert!(rejected.description.contains("STOCK INSUFICIENTE"));
        assert!(rejected.description.contains("**Stock disponible:** 5"));
    }

    #[test]
    fn test_price_updated_offers_product_and_home() {
        let view = price_updated("glock", 150.5);
        assert!(view.description.contains("$150.50"));
        let ids: Vec<&str> = view.buttons.iter().map(|b| b.custom_id.as_str()).collect();
        assert_eq!(ids, ["prod_Z2xvY2s=", "home"]);
    }

    #[test]
    fn test_price_form_targets_submit_action() {
        let form = price_form("glock");
        assert_eq!(form.custom_id, "modal_price_Z2xvY2s=");
        assert_eq!(form.input_id, PRICE_INPUT_ID);
    }

    #[test]
    fn test_quick_stock_total() {
        let view = quick_stock(&inventory());
        assert!(view.description.contains("**Valor total del inventario:** $1812.00"));
    }

    #[test]
    fn test_search() {
        let view = search("carg", &inventory());
        assert!(view.description.contains("cargador pistolas"));
        assert!(view.description.contains("cargador subfusil"));

        let view = search("rifle", &inventory());
        assert_eq!(view.title, "❌ No encontrado");
        assert!(view.description.contains("**rifle**"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            error_message(&AlmacenError::not_found("category", "armass")),
            "❌ Categoría no encontrada"
        );
        assert_eq!(
            error_message(&AlmacenError::InvalidAmount("0".into())),
            "❌ Cantidad inválida: 0"
        );
        assert_eq!(
            error_message(&AlmacenError::data_access("timeout")),
            "❌ Error procesando operación"
        );
    }
}
