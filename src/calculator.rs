use log::{debug, info};

use crate::errors::MeritError;
use crate::order::Order;
use crate::HORIZON;

/// Sorts dispatchables ascending by cost, ties broken by original
/// (insertion) order, and runs the per-frame kernel serially across the
/// whole horizon.
pub fn calculate(order: &mut Order) -> Result<(), MeritError> {
    info!(
        "calculate start: {} consumers, {} always-ons, {} dispatchables, {} flexibles",
        order.consumers.len(),
        order.always_ons.len(),
        order.dispatchables.len(),
        order.flexibles.len()
    );

    sort_dispatchables(order);

    for frame in 0..HORIZON {
        calculate_frame(frame, order)?;
    }

    let unset_price_setters = order.price_setters.iter().filter(|p| p.is_none()).count();
    debug!("calculate done: {unset_price_setters} frames with no recorded price setter");

    Ok(())
}

/// Splits `[0, H)` into `batches` contiguous chunks and runs each chunk's
/// frames in its own task. Refuses to run when any attached flex is
/// storage-backed, since a `Reserve` carries state across frames and
/// batches are processed out of order with respect to one another.
///
/// Integer division means `H % batches != 0` leaves the final
/// `H % batches` frames unprocessed — this mirrors the contiguous-batch
/// split directly rather than papering over an uneven split.
pub fn calculate_parallel(order: &mut Order, batches: usize) -> Result<(), MeritError> {
    info!("calculate_parallel start: {batches} batches over {HORIZON} frames");

    if order.has_storage() {
        return Err(MeritError::StorageInParallel);
    }

    let batch_size = HORIZON / batches.max(1);
    if batches == 0 || batch_size == 0 {
        return Err(MeritError::InvalidBatchCount {
            batches,
            horizon: HORIZON,
        });
    }

    if batch_size * batches != HORIZON {
        debug!(
            "calculate_parallel: {} trailing frames left unprocessed ({batch_size} * {batches} != {HORIZON})",
            HORIZON - batch_size * batches
        );
    }

    sort_dispatchables(order);

    let consumers = &order.consumers;
    let always_ons = &order.always_ons;
    let price_setters = &mut order.price_setters[..batch_size * batches];

    // Disjoint per-batch slices of every dispatchable's load vector,
    // carved out before spawning tasks so each task only ever touches
    // its own batch's cells. Flex load vectors need no such split: the
    // guard above guarantees every attached flex is a bare, non-storage
    // Flex, whose `available_at` is always `0`, so Step C's kernel
    // branch always takes the `m < remaining` arm and leaves flex loads
    // at their initial `0.0` (see the serial kernel for the full
    // branching this specializes).
    let mut dispatchable_batches: Vec<Vec<&mut [f64]>> = vec![Vec::new(); batches];
    for dispatchable in order.dispatchables.iter_mut() {
        for (batch, chunk) in dispatchable.load_mut()[..batch_size * batches]
            .chunks_exact_mut(batch_size)
            .enumerate()
        {
            dispatchable_batches[batch].push(chunk);
        }
    }

    let dispatchable_capacities: Vec<f64> = order.dispatchables.iter().map(|d| d.total_capacity()).collect();

    let price_setter_batches: Vec<&mut [Option<usize>]> = price_setters.chunks_exact_mut(batch_size).collect();

    rayon::scope(|scope| {
        for ((batch_price_setters, dispatchable_loads), batch) in price_setter_batches
            .into_iter()
            .zip(dispatchable_batches.into_iter())
            .zip(0..batches)
        {
            let dispatchable_capacities = &dispatchable_capacities;

            scope.spawn(move |_| {
                let start = batch * batch_size;
                let mut dispatchable_loads = dispatchable_loads;

                for local_frame in 0..batch_size {
                    let frame = start + local_frame;

                    let mut remaining = consumers.iter().map(|c| c.load_at(frame)).sum::<f64>();

                    for always_on in always_ons.iter() {
                        remaining -= always_on.load_at(frame);
                    }
                    remaining = remaining.max(0.0);

                    for (index, (load, capacity)) in dispatchable_loads
                        .iter_mut()
                        .zip(dispatchable_capacities.iter())
                        .enumerate()
                    {
                        let capacity = *capacity;

                        if capacity < remaining {
                            load[local_frame] = capacity;
                            remaining -= capacity;
                        } else {
                            if remaining > 0.0 {
                                load[local_frame] = remaining;
                            }
                            batch_price_setters[local_frame] = Some(index);
                            break;
                        }
                    }
                }
            });
        }
    });

    Ok(())
}

fn sort_dispatchables(order: &mut Order) {
    order
        .dispatchables
        .sort_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap_or(std::cmp::Ordering::Equal));
}

fn calculate_frame(frame: usize, order: &mut Order) -> Result<(), MeritError> {
    let mut remaining = order.demand_at(frame);

    for always_on in order.always_ons.iter() {
        let p = always_on.load_at(frame);

        if p > remaining {
            let mut excess = p - remaining;
            remaining = 0.0;

            for flex in order.flexibles.iter_mut() {
                if excess <= 0.0 {
                    break;
                }
                excess -= flex.assign_excess_at(frame, excess);
            }
        } else {
            remaining -= p;
        }

        remaining = remaining.max(0.0);
    }

    for flex in order.flexibles.iter_mut() {
        let m = flex.available_at(frame);

        if remaining > 0.0 && m < remaining {
            flex.set_load_at(frame, m)?;
            remaining -= m;
        } else {
            if remaining > 0.0 {
                flex.set_load_at(frame, remaining)?;
            }
            if !order.dispatchables.is_empty() {
                order.price_setters[frame] = Some(0);
            }
            break;
        }
    }

    for (index, dispatchable) in order.dispatchables.iter_mut().enumerate() {
        let m = dispatchable.total_capacity();

        if m < remaining {
            dispatchable.set_load_at(frame, m)?;
            remaining -= m;
        } else {
            if remaining > 0.0 {
                dispatchable.set_load_at(frame, remaining)?;
            }
            order.price_setters[frame] = Some(index);
            break;
        }
    }

    Ok(())
}
