mod controller;
mod send;
