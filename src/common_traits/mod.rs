mod debug;
mod default;
mod from;
