use crate::types::{Dataset, Lead, Selector};

/// Borrowed, ordered view over the leads a selector picks out.
#[derive(Debug, Clone, PartialEq)]
pub struct Subset<'a> {
    pub leads: Vec<&'a Lead>,
}

impl<'a> Subset<'a> {
    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Lead> + '_ {
        self.leads.iter().copied()
    }
}

/// `All` keeps everything; a name keeps exact matches only. A name that is not
/// in the dataset yields an empty subset.
pub fn filter<'a>(dataset: &'a Dataset, selector: &Selector) -> Subset<'a> {
    let leads = match selector {
        Selector::All => dataset.leads.iter().collect(),
        Selector::Name(name) => dataset.leads.iter().filter(|l| &l.name == name).collect(),
    };
    Subset { leads }
}
