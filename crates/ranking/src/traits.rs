//! The seam through which catalog records enter the ranking engine.

use data_loader::Paper;

/// Anything the engine can order.
///
/// The engine reads only these two fields. Items are moved through the
/// ranking untouched, so any other data they carry comes back as it went in.
pub trait Rankable {
    /// Raw identifier, possibly with a `-v<digits>` variant suffix
    fn id(&self) -> &str;

    /// Display title, used to break score ties
    fn title(&self) -> &str;
}

impl Rankable for Paper {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl<T: Rankable + ?Sized> Rankable for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn title(&self) -> &str {
        (**self).title()
    }
}
