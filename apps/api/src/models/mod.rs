pub mod curriculo;
