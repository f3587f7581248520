use mongodb::bson::{doc, Document};

/// Requested price ordering, as sent by the storefront dropdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOrder {
    Default,
    Null,
    HighToLow,
    LowToHigh,
}

impl PriceOrder {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("highToLow") => PriceOrder::HighToLow,
            Some("lowToHigh") => PriceOrder::LowToHigh,
            Some("null") => PriceOrder::Null,
            _ => PriceOrder::Default,
        }
    }
}

/// Requested category: the storefront sends "default"/"null" placeholders
/// when nothing is selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryChoice {
    Any,
    Named(String),
}

impl CategoryChoice {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("default") | Some("null") | None => CategoryChoice::Any,
            Some(name) => CategoryChoice::Named(name.to_string()),
        }
    }
}

/// Store query shape for the filter endpoint: an optional equality
/// predicate plus an optional price sort.
#[derive(Debug, Default, PartialEq)]
pub struct FilterPlan {
    pub filter: Option<Document>,
    pub sort: Option<Document>,
}

impl FilterPlan {
    pub fn from_params(price: Option<&str>, category: Option<&str>) -> Self {
        Self::build(PriceOrder::parse(price), CategoryChoice::parse(category))
    }

    // The (price, category) table the storefront depends on. Two quirks are
    // load-bearing: "null" price with a concrete category sorts descending,
    // and "default" price with a concrete category returns everything.
    fn build(price: PriceOrder, category: CategoryChoice) -> Self {
        use CategoryChoice::*;
        use PriceOrder::*;

        match (price, category) {
            (HighToLow, Any) => Self {
                filter: None,
                sort: Some(doc! { "foodPrice": -1 }),
            },
            (LowToHigh, Any) => Self {
                filter: None,
                sort: Some(doc! { "foodPrice": 1 }),
            },
            (HighToLow | Null, Named(name)) => Self {
                filter: Some(doc! { "foodCategory": name }),
                sort: Some(doc! { "foodPrice": -1 }),
            },
            (LowToHigh, Named(name)) => Self {
                filter: Some(doc! { "foodCategory": name }),
                sort: Some(doc! { "foodPrice": 1 }),
            },
            _ => Self::default(),
        }
    }
}
