#[cfg(test)]
mod util;

#[cfg(test)]
mod inventory {
    mod integration;
}
