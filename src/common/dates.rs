// src/common/dates.rs

use chrono::NaiveDate;

// Utilitários de intervalo de datas usados pelo motor de reservas.
// Os intervalos são semiabertos: [check_in, check_out). O dia do check-out
// fica livre para o próximo check-in.

/// Quantidade de noites entre o check-in e o check-out.
///
/// Pré-condição (garantida pelo chamador): `check_out > check_in`.
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i32 {
    (check_out - check_in).num_days() as i32
}

/// Dois intervalos semiabertos compartilham pelo menos um dia?
pub fn overlaps(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    !(a_end <= b_start || a_start >= b_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn nights_counts_whole_days() {
        assert_eq!(nights(d("2024-03-15"), d("2024-03-20")), 5);
        assert_eq!(nights(d("2024-03-15"), d("2024-03-16")), 1);
        assert_eq!(nights(d("2024-02-28"), d("2024-03-01")), 2); // ano bissexto
    }

    #[test]
    fn overlapping_ranges_detected() {
        assert!(overlaps(
            d("2024-03-18"),
            d("2024-03-22"),
            d("2024-03-15"),
            d("2024-03-20"),
        ));
        // Intervalo contido dentro de outro
        assert!(overlaps(
            d("2024-03-16"),
            d("2024-03-17"),
            d("2024-03-15"),
            d("2024-03-20"),
        ));
        // Intervalos idênticos
        assert!(overlaps(
            d("2024-03-15"),
            d("2024-03-20"),
            d("2024-03-15"),
            d("2024-03-20"),
        ));
    }

    #[test]
    fn back_to_back_is_not_overlap() {
        // Check-out no mesmo dia do check-in seguinte não conflita
        assert!(!overlaps(
            d("2024-03-20"),
            d("2024-03-25"),
            d("2024-03-15"),
            d("2024-03-20"),
        ));
        assert!(!overlaps(
            d("2024-03-10"),
            d("2024-03-15"),
            d("2024-03-15"),
            d("2024-03-20"),
        ));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        assert!(!overlaps(
            d("2024-04-01"),
            d("2024-04-05"),
            d("2024-03-15"),
            d("2024-03-20"),
        ));
    }
}
