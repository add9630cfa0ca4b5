//! Read-only lookups used to prefill forms.

pub mod autofill;
pub mod gn_division;

pub use autofill::{AutofillService, CitizenAutofill};
pub use gn_division::GnDivisionService;
