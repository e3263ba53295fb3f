use crate::{Error, Query};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
pub enum Order {
    /// Threads newest-first, each walked depth-first with replies in the
    /// order they were posted
    #[default]
    Tree,
    Newest,
    Oldest,
    MostLiked,
}

impl std::str::FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> Result<Order, String> {
        match s {
            "tree" => Ok(Order::Tree),
            "newest" => Ok(Order::Newest),
            "oldest" => Ok(Order::Oldest),
            "most-liked" => Ok(Order::MostLiked),
            _ => Err(format!(
                "unknown order {s:?}, expected one of tree, newest, oldest, most-liked"
            )),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Search {
    pub filter: Query,
    pub order: Order,
}

impl Search {
    pub fn parse(search: &str, order: Order) -> Result<Search, Error> {
        let filter = Query::from_search(search)?;
        Ok(Search { filter, order })
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.filter.validate()
    }
}
