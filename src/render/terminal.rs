//! Plain-text render target for the `storefront` binary

use super::models::{CartRow, PageLink, ProductCard, ProductDetail, Toast, ToastLevel};
use super::{CartView, CatalogView, Notifier};
use std::fmt;
use std::io::{self, Stdout, Write};

/// Writes every render call as plain text lines, to stdout by default
#[derive(Debug)]
pub struct TerminalView<W = Stdout> {
    out: W,
}

impl TerminalView<Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalView<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalView<W> {
    /// Renders into `out` instead of stdout
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args) {
            tracing::warn!("could not write to terminal: {}", e);
        }
    }
}

impl<W: Write + Send> CatalogView for TerminalView<W> {
    fn render_products(&mut self, cards: &[ProductCard]) {
        for card in cards {
            self.line(format_args!(
                "#{:<5} {:<40} {:>10}  {} ({})",
                card.id, card.title, card.price, card.stars, card.rating
            ));
            if !card.category.is_empty() {
                self.line(format_args!("       [{}]", card.category));
            }
            if !card.excerpt.is_empty() {
                self.line(format_args!("       {}", card.excerpt));
            }
        }
    }

    fn render_empty(&mut self, message: &str) {
        self.line(format_args!("{}", message));
    }

    fn render_pagination(&mut self, links: &[PageLink]) {
        if links.is_empty() {
            return;
        }
        let pages: Vec<String> = links
            .iter()
            .map(|link| {
                if link.active {
                    format!("[{}]", link.page)
                } else {
                    link.page.to_string()
                }
            })
            .collect();
        self.line(format_args!("Pages: {}", pages.join(" ")));
    }

    fn set_result_info(&mut self, info: &str) {
        self.line(format_args!("{}", info));
    }

    fn set_active_category(&mut self, category: &str) {
        if !category.is_empty() {
            self.line(format_args!("Category: {}", category));
        }
    }

    fn show_detail(&mut self, detail: &ProductDetail) {
        self.line(format_args!("#{} {}", detail.id, detail.title));
        if !detail.category.is_empty() {
            self.line(format_args!("{}", detail.category));
        }
        self.line(format_args!("{}", detail.price));
        self.line(format_args!("{} ({})", detail.stars, detail.rating));
        self.line(format_args!("{}", detail.description));
        self.line(format_args!("Image: {}", detail.image));
    }
}

impl<W: Write + Send> CartView for TerminalView<W> {
    fn render_items(&mut self, rows: &[CartRow]) {
        self.line(format_args!("Cart:"));
        for row in rows {
            self.line(format_args!(
                "#{:<5} {:<40} {} x {} = {}",
                row.id, row.title, row.unit_price, row.qty, row.line_total
            ));
        }
    }

    fn render_empty(&mut self, message: &str) {
        self.line(format_args!("Cart: {}", message));
    }

    fn set_total(&mut self, total: &str) {
        self.line(format_args!("Total: {}", total));
    }

    fn set_count(&mut self, count: &str) {
        self.line(format_args!("Items in cart: {}", count));
    }

    // The contents are printed as they render; there is no panel to reveal.
    fn open_drawer(&mut self) {}
}

impl<W: Write + Send> Notifier for TerminalView<W> {
    fn notify(&mut self, toast: Toast) {
        match toast.level {
            ToastLevel::Info => self.line(format_args!("* {}", toast.message)),
            ToastLevel::Error => self.line(format_args!("! {}", toast.message)),
        }
    }
}
