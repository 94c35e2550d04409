pub mod birthday_pipeline;
