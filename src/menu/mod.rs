//! Interactive text menu driving the inventory client.

pub mod prompt;
pub mod render;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{error, info};

use crate::clients::InventoryClient;
use crate::domain::{validate_name, validate_price, validate_quantity, ProductDraft, ProductId};
use crate::error::{InventoryError, InventoryResult};
use crate::inventory::SummaryReport;
use prompt::Prompt;

/// How the menu loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuExit {
    /// The inventory was saved before leaving.
    Saved,
    /// Saving failed and the user chose to leave anyway.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Update,
    Delete,
    Summary,
    Exit,
}

impl MenuChoice {
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(Self::Add),
            2 => Some(Self::View),
            3 => Some(Self::Update),
            4 => Some(Self::Delete),
            5 => Some(Self::Summary),
            6 => Some(Self::Exit),
            _ => None,
        }
    }
}

enum Flow {
    Continue,
    EndOfInput,
}

pub struct Menu<R, W> {
    prompt: Prompt<R, W>,
    client: InventoryClient,
    currency: String,
}

impl<R, W> Menu<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, client: InventoryClient, currency: impl Into<String>) -> Self {
        Self {
            prompt: Prompt::new(reader, writer),
            client,
            currency: currency.into(),
        }
    }

    /// Runs until the user exits or input ends. Both paths save first.
    ///
    /// If the loop fails on console I/O, one last save is attempted before
    /// the error is returned, so earlier changes still reach the snapshot.
    ///
    /// # Errors
    /// Console I/O failures and a lost inventory actor; every inventory
    /// validation failure is reported to the user and the loop continues.
    pub async fn run(&mut self) -> Result<MenuExit> {
        let outcome = self.run_loop().await;
        if let Err(e) = &outcome {
            if is_actor_lost(e) {
                return outcome;
            }
            error!(error = %e, "Menu failed, saving inventory before leaving");
            match self.client.save().await {
                Ok(()) => info!("Inventory saved after menu failure"),
                Err(save_err) => error!(error = %save_err, "Inventory save after menu failure failed"),
            }
        }
        outcome
    }

    async fn run_loop(&mut self) -> Result<MenuExit> {
        loop {
            self.prompt.say(render::MENU).await?;
            let Some(number) = self.prompt.ask_integer::<i64>("Choose option: ").await? else {
                return self.exit().await;
            };

            let flow = match MenuChoice::from_number(number) {
                Some(MenuChoice::Add) => self.add_product().await?,
                Some(MenuChoice::View) => self.view_products().await?,
                Some(MenuChoice::Update) => self.update_product().await?,
                Some(MenuChoice::Delete) => self.delete_product().await?,
                Some(MenuChoice::Summary) => self.display_summary().await?,
                Some(MenuChoice::Exit) => {
                    if let Some(exit) = self.try_exit().await? {
                        return Ok(exit);
                    }
                    Flow::Continue
                }
                None => {
                    self.prompt.say("Invalid choice! Please select 1-6.").await?;
                    Flow::Continue
                }
            };

            if let Flow::EndOfInput = flow {
                return self.exit().await;
            }
        }
    }

    async fn add_product(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt.ask_integer::<ProductId>("Enter Product ID: ").await? else {
            return Ok(Flow::EndOfInput);
        };
        let result = self.client.contains_product(id).await;
        let exists = self.checked(result).await?;
        if exists == Some(true) {
            self.report(&InventoryError::DuplicateId(id)).await?;
            return Ok(Flow::Continue);
        }

        let Some(draft) = self.ask_draft("Enter Product Name: ", "Enter Quantity: ", "Enter Price: ").await? else {
            return Ok(Flow::EndOfInput);
        };
        if let Some(draft) = draft {
            let result = self.client.create_product(id, draft).await;
            if self.checked(result).await?.is_some() {
                self.prompt.say("Product added successfully!").await?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn view_products(&mut self) -> Result<Flow> {
        let result = self.client.list_products().await;
        let Some(mut products) = self.checked(result).await? else {
            return Ok(Flow::Continue);
        };
        if products.is_empty() {
            self.prompt.say("No products available.").await?;
            return Ok(Flow::Continue);
        }

        products.sort_unstable_by_key(|product| product.id);
        self.prompt.say("\n--- Product List ---").await?;
        for product in &products {
            let line = render::product_line(product, &self.currency);
            self.prompt.say(&line).await?;
        }
        Ok(Flow::Continue)
    }

    async fn update_product(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt.ask_integer::<ProductId>("Enter Product ID to update: ").await? else {
            return Ok(Flow::EndOfInput);
        };
        let result = self.client.get_product(id).await;
        let Some(current) = self.checked(result).await? else {
            return Ok(Flow::Continue);
        };
        let line = render::product_line(&current, &self.currency);
        self.prompt.say(&format!("Current: {line}")).await?;

        let Some(draft) = self.ask_draft("Enter new name: ", "Enter new quantity: ", "Enter new price: ").await? else {
            return Ok(Flow::EndOfInput);
        };
        if let Some(draft) = draft {
            let result = self.client.update_product(id, draft).await;
            if self.checked(result).await?.is_some() {
                self.prompt.say("Product updated successfully!").await?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn delete_product(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt.ask_integer::<ProductId>("Enter Product ID to delete: ").await? else {
            return Ok(Flow::EndOfInput);
        };
        let result = self.client.delete_product(id).await;
        if self.checked(result).await?.is_some() {
            self.prompt.say("Product deleted successfully!").await?;
        }
        Ok(Flow::Continue)
    }

    async fn display_summary(&mut self) -> Result<Flow> {
        let result = self.client.summary().await;
        match self.checked(result).await? {
            Some(SummaryReport::Empty) => self.prompt.say("Inventory is empty.").await?,
            Some(SummaryReport::Totals(totals)) => {
                for line in render::summary_lines(&totals, &self.currency) {
                    self.prompt.say(&line).await?;
                }
            }
            None => {}
        }
        Ok(Flow::Continue)
    }

    /// Reads name, quantity and price, stopping at the first invalid field
    /// the way the registry would reject it.
    ///
    /// Outer `None` means input ended; inner `None` means a field was rejected
    /// and already reported.
    async fn ask_draft(
        &mut self,
        name_prompt: &str,
        quantity_prompt: &str,
        price_prompt: &str,
    ) -> Result<Option<Option<ProductDraft>>> {
        let Some(name) = self.prompt.ask_line(name_prompt).await? else {
            return Ok(None);
        };
        if let Err(e) = validate_name(&name) {
            self.report(&e).await?;
            return Ok(Some(None));
        }

        let Some(quantity) = self.prompt.ask_integer::<i64>(quantity_prompt).await? else {
            return Ok(None);
        };
        if let Err(e) = validate_quantity(quantity) {
            self.report(&e).await?;
            return Ok(Some(None));
        }

        let Some(price) = self.prompt.ask_decimal::<Decimal>(price_prompt).await? else {
            return Ok(None);
        };
        if let Err(e) = validate_price(price) {
            self.report(&e).await?;
            return Ok(Some(None));
        }

        Ok(Some(Some(ProductDraft::new(name, quantity, price))))
    }

    /// Exit path for end of input: there is nobody left to ask, so a failed
    /// save discards.
    async fn exit(&mut self) -> Result<MenuExit> {
        match self.try_exit().await? {
            Some(exit) => Ok(exit),
            None => Ok(MenuExit::Discarded),
        }
    }

    /// Saves and decides whether to leave. `None` means stay in the menu.
    async fn try_exit(&mut self) -> Result<Option<MenuExit>> {
        match self.client.save().await {
            Ok(()) => {
                self.prompt.say("Exiting system...").await?;
                return Ok(Some(MenuExit::Saved));
            }
            Err(InventoryError::ActorCommunication(e)) => {
                return Err(InventoryError::ActorCommunication(e)).context("inventory actor unavailable");
            }
            Err(e) => self.report(&e).await?,
        }

        let answer = self
            .prompt
            .ask_line("Exit anyway and discard unsaved changes? [y/N]: ")
            .await?;
        match answer.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("y") | Some("yes") | None => {
                error!("Exiting without saving; changes since the last snapshot are lost");
                self.prompt.say("Exiting without saving...").await?;
                Ok(Some(MenuExit::Discarded))
            }
            Some(_) => {
                info!("Exit cancelled after failed save");
                Ok(None)
            }
        }
    }

    /// Reports a recoverable failure and yields `None`; a lost actor is fatal.
    async fn checked<T>(&mut self, result: InventoryResult<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(InventoryError::ActorCommunication(e)) => {
                Err(InventoryError::ActorCommunication(e)).context("inventory actor unavailable")
            }
            Err(e) => {
                self.report(&e).await?;
                Ok(None)
            }
        }
    }

    async fn report(&mut self, err: &InventoryError) -> Result<()> {
        self.prompt.say(&render::error_message(err)).await?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.prompt.into_writer()
    }
}

fn is_actor_lost(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InventoryError>(),
        Some(InventoryError::ActorCommunication(_))
    )
}
