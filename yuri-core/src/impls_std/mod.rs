mod list;
mod map;
mod option;
mod pointer;
mod scalar;
mod tuple;
