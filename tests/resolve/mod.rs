mod tokens;
mod transforms;
