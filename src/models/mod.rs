pub mod busbar;
pub mod company;
pub mod company_account;
pub mod component;
pub mod corepart;
pub mod palet;
pub mod panel;

#[allow(unused_imports)]
pub mod prelude {
    pub use super::busbar::{self, Entity as Busbar};
    pub use super::company::{self, Entity as Company};
    pub use super::company_account::{self, Entity as CompanyAccount};
    pub use super::component::{self, Entity as Component};
    pub use super::corepart::{self, Entity as Corepart};
    pub use super::palet::{self, Entity as Palet};
    pub use super::panel::{self, Entity as Panel};
}
