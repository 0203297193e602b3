use crate::error::ClientResult;
use crate::models::Meal;
use crate::services::api::ApiClient;
use crate::services::listing::MealListing;

const DEAL_MARKUP: f64 = 1.3;
const DEAL_BADGE: &str = "30% OFF";
const PRICE_UNAVAILABLE: &str = "price unavailable";
const DEFAULT_DESCRIPTION: &str = "Delicious meal prepared with fresh ingredients.";

/// Meal browsing page: fetched collections plus the loading flag.
#[derive(Debug)]
pub struct MealBrowser {
    pub listing: MealListing,
    loading: bool,
}

impl Default for MealBrowser {
    fn default() -> Self {
        Self {
            listing: MealListing::default(),
            loading: true,
        }
    }
}

impl MealBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetches meals and providers concurrently.
    ///
    /// Both must succeed for either to be stored. The loading flag is cleared
    /// whatever the outcome; failures are logged and handed back.
    pub async fn load(&mut self, api: &ApiClient) -> ClientResult<()> {
        let result = tokio::try_join!(api.fetch_meals(), api.fetch_providers());
        self.loading = false;

        match result {
            Ok((meals, providers)) => {
                tracing::debug!("Loaded {} meals and {} providers", meals.len(), providers.len());
                self.listing.set_meals(meals);
                self.listing.set_providers(providers);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load meals: {e}");
                Err(e)
            }
        }
    }
}

/// Display model for a single meal tile.
#[derive(Debug, Clone, Copy)]
pub struct MealCard<'a> {
    meal: &'a Meal,
    is_deal: bool,
}

impl<'a> MealCard<'a> {
    pub fn new(meal: &'a Meal, is_deal: bool) -> Self {
        Self { meal, is_deal }
    }

    pub fn meal(&self) -> &'a Meal {
        self.meal
    }

    pub fn price(&self) -> ClientResult<String> {
        Ok(format!("{:.2}", self.meal.price_value()?))
    }

    /// Struck-through "before" price shown on deals.
    pub fn original_price(&self) -> ClientResult<Option<String>> {
        if !self.is_deal {
            return Ok(None);
        }
        let price = self.meal.price_value()?;
        Ok(Some(format!("{:.2}", price * DEAL_MARKUP)))
    }

    pub fn badge(&self) -> Option<&'static str> {
        self.is_deal.then_some(DEAL_BADGE)
    }

    pub fn description(&self) -> &'a str {
        if self.meal.description.is_empty() {
            DEFAULT_DESCRIPTION
        } else {
            &self.meal.description
        }
    }

    /// Price line for listings, e.g. `$9.99 (was $12.99) [30% OFF]`.
    ///
    /// An unreadable price shows a placeholder so one bad meal does not hide
    /// the rest of the listing.
    pub fn price_label(&self) -> String {
        let prices = self.price().and_then(|p| Ok((p, self.original_price()?)));
        let mut label = match prices {
            Ok((price, Some(original))) => format!("${price} (was ${original})"),
            Ok((price, None)) => format!("${price}"),
            Err(e) => {
                tracing::warn!("Meal #{} has no displayable price: {e}", self.meal.id);
                PRICE_UNAVAILABLE.to_string()
            }
        };
        if let Some(badge) = self.badge() {
            label.push_str(&format!(" [{badge}]"));
        }
        label
    }

    pub fn add_to_cart(&self) -> String {
        add_to_cart(self.meal)
    }
}

/// Cart placeholder: nothing is stored, only the confirmation text.
pub fn add_to_cart(meal: &Meal) -> String {
    tracing::info!("Cart placeholder: {} (#{})", meal.name, meal.id);
    format!("Added {} to cart!", meal.name)
}
