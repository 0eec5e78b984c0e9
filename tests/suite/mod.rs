mod config;
mod navigation;
