//! Domain models for the Boxing Academy backend.

pub mod bmi;
pub mod cart;
pub mod chat;
pub mod content;
pub mod faq;
pub mod membership;
pub mod schedule;
pub mod shop;
pub mod user;

pub use bmi::{BmiCategory, BmiRequest, BmiResult};
pub use cart::{Cart, CartError, CartLine, CartPricing, CartSummary};
pub use chat::{ChatExchange, NewChatExchange, ResolutionSource};
pub use content::{
    AboutContent, Event, GalleryCategory, GalleryImage, HomePageContent, MembershipPageContent,
    NavbarItem, PageSingleton, Service, SiteFooter, SiteHeader, Trainer,
};
pub use faq::FaqEntry;
pub use membership::{MembershipPlan, MembershipPlanView, PlanDuration, PlanType};
pub use schedule::{ScheduleSlot, Weekday};
pub use shop::{ShopItem, ShopQuery, ShopSort};
pub use user::User;
