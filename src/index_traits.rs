// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the trait that needs to be implemented by the type
//! that represents an entry of an index multiplier table.

/**
This trait needs to be implemented by the type that represents a single
`(month, multiplier)` entry of an inflation index table.

The index table is fetched by a separate service, and this library doesn't
know about its types.  Read more about how the table is used
[here][crate#index-adjustment].

<details>
<summary>Example implementation for an index service response:</summary>

```ignore
impl frequenz_contract_periodization::IndexEntry for index_api::MonthlyIndexValue {
    fn month_key(&self) -> &str {
        // "2024-03-01T00:00:00Z", only the leading "YYYY-MM" is used.
        &self.reference_date
    }

    fn multiplier(&self) -> f64 {
        self.value / self.base_value
    }
}
```

</details>
*/
pub trait IndexEntry {
    /// Returns the month of the entry, as a `YYYY-MM`-or-finer date string.
    fn month_key(&self) -> &str;
    /// Returns the multiplier to apply to base prices of that month.
    fn multiplier(&self) -> f64;
}

impl IndexEntry for (String, f64) {
    fn month_key(&self) -> &str {
        &self.0
    }

    fn multiplier(&self) -> f64 {
        self.1
    }
}

impl IndexEntry for (&str, f64) {
    fn month_key(&self) -> &str {
        self.0
    }

    fn multiplier(&self) -> f64 {
        self.1
    }
}
