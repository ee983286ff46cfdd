//! Counter sample decoding
//!
//! Counter tracks announce how their samples are encoded: a unit multiplier
//! and whether samples are absolute or deltas. Incremental counters keep a
//! running total in their reservation, scoped to the packet sequence that
//! announced them; the producer resets that total by clearing its
//! incremental state.

use crate::reservation::ReservationStore;
use tracing::debug;

impl ReservationStore {
    /// Turn a raw counter sample into an absolute value
    ///
    /// Returns `None` when `uuid` is not a reserved counter, or when it is
    /// incremental and `packet_sequence_id` is not the sequence it is bound
    /// to. A rejected sample leaves the running total untouched.
    pub fn convert_to_absolute_counter_value(
        &mut self,
        uuid: u64,
        packet_sequence_id: u32,
        value: i64,
    ) -> Option<i64> {
        let Some(reservation) = self.reservations.get_mut(&uuid) else {
            debug!(uuid, "Unknown counter track");
            return None;
        };

        if !reservation.is_counter {
            debug!(uuid, "Track is not a counter track");
            return None;
        }

        if reservation.is_incremental && reservation.packet_sequence_id != packet_sequence_id {
            debug!(
                uuid,
                expected = reservation.packet_sequence_id,
                got = packet_sequence_id,
                "Incremental counter sample from a foreign packet sequence"
            );
            return None;
        }

        let mut value = value;
        if reservation.unit_multiplier > 0 {
            value = value.wrapping_mul(reservation.unit_multiplier);
        }

        if reservation.is_incremental {
            value = value.wrapping_add(reservation.latest_value);
            reservation.latest_value = value;
        }

        Some(value)
    }

    /// Reset the running totals of incremental counters on a sequence
    pub fn on_incremental_state_cleared(&mut self, packet_sequence_id: u32) {
        for reservation in self.reservations.values_mut() {
            if reservation.is_incremental && reservation.packet_sequence_id == packet_sequence_id
            {
                reservation.latest_value = 0;
            }
        }
    }
}
