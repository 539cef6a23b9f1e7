pub mod assignment;
pub mod cell;
pub mod fine;
pub mod record;
pub mod shift;
